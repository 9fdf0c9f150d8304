//! Runtime error types

use thiserror::Error;
use verdict_core::CoreError;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Operand type error in the expression evaluator
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Arithmetic division (or modulo) by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Wall-clock budget exceeded between nodes
    #[error("evaluation exceeded the {limit_ms} ms execution limit")]
    Timeout { limit_ms: u64 },

    /// A node failed; wraps the underlying error with the node's identity
    #[error("node '{node_id}' ({kind}) failed: {source}")]
    Node {
        node_id: String,
        kind: &'static str,
        source: Box<RuntimeError>,
    },
}

impl From<CoreError> for RuntimeError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::TypeMismatch(message) => RuntimeError::TypeMismatch(message),
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
