//! Error types for marginalia.

use thiserror::Error;

/// Result type alias using marginalia's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for marginalia operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Annotation not found
    #[error("Annotation not found: {0}")]
    AnnotationNotFound(i64),

    /// A stored quote could not be relocated in the current document
    #[error("Anchor not found: {0}")]
    AnchorNotFound(String),

    /// Upstream translation provider failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input (empty or oversized fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
