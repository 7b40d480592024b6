//! Error types for the persistence layer

use thiserror::Error;

/// Result type alias for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Errors that can occur in the persistence layer
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid data format or corruption
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// A stored record could not be brought up to the current schema
    #[error("Migration error: {0}")]
    Migration(String),

    /// Invalid operation for current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl PersistenceError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new corruption error
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }

    /// Create a new migration error
    pub fn migration(msg: impl Into<String>) -> Self {
        Self::Migration(msg.into())
    }

    /// Create a new invalid operation error
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }
}
