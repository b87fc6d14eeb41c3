//! Error types for the stat store

use thiserror::Error;

/// Result type alias for record source operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in a record source backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O errors (dataset files, database files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database errors from the sqlite backend
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Dataset contents failed validation
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
}

impl StoreError {
    /// Create a new invalid dataset error
    pub fn invalid_dataset(msg: impl Into<String>) -> Self {
        Self::InvalidDataset(msg.into())
    }
}
