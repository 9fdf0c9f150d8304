//! Repository error types

use thiserror::Error;

/// Repository error
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No document is registered under the requested key
    #[error("decision '{key}' not found")]
    NotFound { key: String },

    /// The backing store rejected the key (e.g. a path escaping the root)
    #[error("invalid decision key '{key}': {message}")]
    InvalidKey { key: String, message: String },

    /// I/O failure while reading a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document bytes were not valid JDM JSON
    #[error("failed to decode document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
