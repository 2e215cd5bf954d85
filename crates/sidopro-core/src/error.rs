//! Error types for the progress documentation library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for every store, validation and configuration operation.
#[derive(Error, Debug)]
pub enum ProgressError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Project key that names no known project
    #[error("Unknown project '{key}'")]
    UnknownProject { key: String },
    /// Stage id outside the project's configured stage list
    #[error("Stage {id} is not configured for project '{project}'")]
    StageNotFound { project: String, id: u32 },
    /// Report not found for the given ID
    #[error("Report with ID {id} not found")]
    ReportNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ProgressError {
        ProgressError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ProgressError {
        ProgressError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ProgressError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a blocking-pool join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

/// Specialized extension trait for configuration-related Results.
pub trait ConfigResultExt<T> {
    /// Map any displayable error into a configuration error with a message.
    fn config_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ProgressError::database(message).with_source(e))
    }
}

impl<T, E> ConfigResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn config_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ProgressError::Configuration {
            message: format!("{message}: {e}"),
        })
    }
}

/// Result type alias for progress operations
pub type Result<T> = std::result::Result<T, ProgressError>;
