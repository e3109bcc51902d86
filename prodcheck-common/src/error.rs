//! Common error types for prodcheck

use thiserror::Error;

/// Common result type for prodcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the prodcheck crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input or violated precondition
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
