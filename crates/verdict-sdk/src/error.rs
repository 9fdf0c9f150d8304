//! SDK error types

use thiserror::Error;

/// Engine error, aggregating every layer a call can fail in
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Loader failure (including unknown keys)
    #[error("repository error: {0}")]
    Repository(#[from] verdict_repository::RepositoryError),

    /// Document failed validation or compilation
    #[error("compile error: {0}")]
    Compile(#[from] verdict_compiler::CompileError),

    /// Evaluation failed at runtime
    #[error("runtime error: {0}")]
    Runtime(#[from] verdict_runtime::RuntimeError),
}

impl EngineError {
    /// True when the error is an unresolved decision key
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::Repository(verdict_repository::RepositoryError::NotFound { .. })
        )
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let error: EngineError = verdict_repository::RepositoryError::NotFound {
            key: "ghost".to_string(),
        }
        .into();
        assert!(error.is_not_found());
        assert!(error.to_string().contains("ghost"));

        let error = EngineError::Config("bad".to_string());
        assert!(!error.is_not_found());
    }
}
