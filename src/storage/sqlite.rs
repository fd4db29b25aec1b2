use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

use super::{defaults, Category, Collection, ContextEntry, Store, Task};
use crate::config::DatabaseConfig;
use crate::error::{StorageError, StorageResult};

/// SQLite-backed key-value store.
///
/// Each logical collection is one row in the `collections` table, holding
/// the whole record list as a JSON document. Writes replace the document
/// in a single statement, so no partial state is ever observable.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store instance
    pub async fn new(config: &DatabaseConfig) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Connection {
                message: format!("Failed to create database directory: {}", e),
            })?;
        }

        let database_url = format!("sqlite://{}?mode=rwc", config.path.display());

        let options = SqliteConnectOptions::from_str(&database_url)
            .map_err(|e| StorageError::Connection {
                message: format!("Invalid database URL: {}", e),
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection {
                message: format!("Failed to connect to database: {}", e),
            })?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// Capped at a single connection: each SQLite `:memory:` connection
    /// gets its own database.
    pub async fn new_in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StorageError::Connection {
                message: format!("Invalid database URL: {}", e),
            }
        })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection {
                message: format!("Failed to connect to in-memory database: {}", e),
            })?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    async fn init_schema(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS collections (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Collection schema ready");
        Ok(())
    }

    /// Get the underlying pool for advanced queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Read a collection document, returning `None` if never written.
    async fn read_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> StorageResult<Option<Vec<T>>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM collections WHERE key = ?")
                .bind(collection.key())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((value,)) => {
                let records =
                    serde_json::from_str(&value).map_err(|e| StorageError::Serialization {
                        collection: collection.key().to_string(),
                        source: e,
                    })?;
                Ok(Some(records))
            }
            None => {
                debug!(collection = %collection, "Collection never written, using defaults");
                Ok(None)
            }
        }
    }

    /// Replace a collection document wholesale.
    async fn write_collection<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> StorageResult<()> {
        let value = serde_json::to_string(records).map_err(|e| StorageError::Serialization {
            collection: collection.key().to_string(),
            source: e,
        })?;

        sqlx::query(
            r#"
            INSERT INTO collections (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(collection.key())
        .bind(&value)
        .execute(&self.pool)
        .await?;

        debug!(collection = %collection, records = records.len(), "Collection replaced");
        Ok(())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn load_tasks(&self) -> StorageResult<Vec<Task>> {
        Ok(self
            .read_collection(Collection::Tasks)
            .await?
            .unwrap_or_else(defaults::default_tasks))
    }

    async fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()> {
        self.write_collection(Collection::Tasks, tasks).await
    }

    async fn load_context_entries(&self) -> StorageResult<Vec<ContextEntry>> {
        Ok(self
            .read_collection(Collection::Context)
            .await?
            .unwrap_or_else(defaults::default_context_entries))
    }

    async fn save_context_entries(&self, entries: &[ContextEntry]) -> StorageResult<()> {
        self.write_collection(Collection::Context, entries).await
    }

    async fn load_categories(&self) -> StorageResult<Vec<Category>> {
        Ok(self
            .read_collection(Collection::Categories)
            .await?
            .unwrap_or_else(defaults::default_categories))
    }

    async fn save_categories(&self, categories: &[Category]) -> StorageResult<()> {
        self.write_collection(Collection::Categories, categories).await
    }
}
