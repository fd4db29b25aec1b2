use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or missing configuration value.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// Error from the persistence gateway.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from the task repository.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Unexpected internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal failure.
        message: String,
    },
}

/// Persistence gateway errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be opened or the schema created.
    #[error("Database connection failed: {message}")]
    Connection {
        /// Description of the connection failure.
        message: String,
    },

    /// A record list could not be serialized or deserialized.
    #[error("Serialization failed for collection {collection}: {source}")]
    Serialization {
        /// Logical key of the affected collection.
        collection: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Underlying SQLx error.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Task repository errors.
///
/// Variants carry the user-facing labels the UI layer shows; the
/// underlying storage failure is preserved as the error source. Missing
/// ids on update/delete are a defined no-op, not an error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The task collection could not be read.
    #[error("Failed to load tasks")]
    LoadTasks(#[source] StorageError),

    /// A newly created task could not be persisted.
    #[error("Failed to add task")]
    AddTask(#[source] StorageError),

    /// A task mutation could not be persisted.
    #[error("Failed to update task")]
    UpdateTask(#[source] StorageError),

    /// A task removal could not be persisted.
    #[error("Failed to delete task")]
    DeleteTask(#[source] StorageError),

    /// Rescoring succeeded but the result could not be persisted, or the
    /// inputs could not be read.
    #[error("Failed to reprioritize tasks")]
    Reprioritize(#[source] StorageError),

    /// The context collection could not be read.
    #[error("Failed to load context entries")]
    LoadContext(#[source] StorageError),

    /// A context entry mutation could not be persisted.
    #[error("Failed to save context entries")]
    SaveContext(#[source] StorageError),

    /// The category collection could not be read.
    #[error("Failed to load categories")]
    LoadCategories(#[source] StorageError),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
