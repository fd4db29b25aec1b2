//! # Smart Todo Core
//!
//! The persistence and heuristic-insight core of a single-user task
//! manager. Task records, ambient context notes, and categories live in a
//! durable key-value store; a deterministic, keyword-driven insight engine
//! scores task priority, suggests deadlines and categories, enhances
//! descriptions, and extracts task drafts from free-text context.
//!
//! ## Features
//!
//! - **Task Repository**: CRUD over the task collection plus bulk
//!   reprioritization through the insight engine
//! - **Insight Engine**: pure heuristic functions - priority scoring,
//!   deadline/category suggestion, description enhancement, context
//!   analysis, and task-draft extraction
//! - **Context Entries**: free-text evidence (email, chat, notes) analyzed
//!   into insights and task suggestions
//! - **Persistence Gateway**: whole-collection reads and writes over a
//!   SQLite-backed key-value store, with seeded defaults on first read
//! - **Debounced Suggestions**: last-request-wins recomputation of live
//!   suggestions while a task is being edited
//!
//! ## Architecture
//!
//! ```text
//! UI layer (not here) → TaskRepository → InsightEngine (pure)
//!                            ↓
//!                      Store (SQLite KV)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use smart_todo::{Config, InsightEngine, TaskRepository};
//! use smart_todo::engine::SystemClock;
//! use smart_todo::storage::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     smart_todo::logging::init(&config.logging);
//!     let store = SqliteStore::new(&config.database).await?;
//!     let clock = Arc::new(SystemClock);
//!     let engine = InsightEngine::new(clock.clone(), config.engine.baseline.clone());
//!     let repo = TaskRepository::new(Arc::new(store), engine, clock);
//!     let tasks = repo.reprioritize().await?;
//!     println!("top task: {}", tasks[0].title);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Configuration management loaded from the environment.
pub mod config;
/// Heuristic insight engine: scoring, suggestions, and context analysis.
pub mod engine;
/// Error types and result aliases for the crate.
pub mod error;
/// Tracing subscriber initialization for embedders.
pub mod logging;
/// Key-value persistence gateway and domain records.
pub mod storage;
/// Task repository and debounced live suggestions.
pub mod tasks;

pub use config::Config;
pub use engine::InsightEngine;
pub use error::{AppError, AppResult};
pub use tasks::TaskRepository;
