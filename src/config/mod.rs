use std::env;
use std::path::PathBuf;

use crate::engine::BaselinePolicy;
use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Insight engine configuration.
    pub engine: EngineConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level filter (overridden by `RUST_LOG`).
    pub level: String,
    /// Log output format.
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human-readable output.
    Pretty,
    /// Structured JSON output.
    Json,
}

/// Insight engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Priority scoring baseline policy.
    pub baseline: BaselinePolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database = DatabaseConfig {
            path: PathBuf::from(
                env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/smart-todo.db".to_string()),
            ),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let engine = EngineConfig {
            baseline: match env::var("PRIORITY_BASELINE") {
                Ok(value) => value.parse().map_err(|e| AppError::Config {
                    message: format!("Invalid PRIORITY_BASELINE: {}", e),
                })?,
                Err(_) => BaselinePolicy::default(),
            },
        };

        Ok(Config {
            database,
            logging,
            engine,
        })
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/smart-todo.db"),
            max_connections: 5,
        }
    }
}
