//! Error types for verdict core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// An operation was applied to a value of the wrong type
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
