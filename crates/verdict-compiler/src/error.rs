//! Compiler error types

use thiserror::Error;
use verdict_parser::ParseError;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// Structural defect: cycle, dangling edge, missing input/output node,
    /// mismatched node id, unwired switch edge
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Node `type` string not recognized
    #[error("unknown node kind '{kind}' on node '{node_id}'")]
    UnknownNodeKind { node_id: String, kind: String },

    /// Node requires a content payload but carries none
    #[error("node '{node_id}' has no content")]
    MissingContent { node_id: String },

    /// Content payload did not match the node kind's schema
    #[error("invalid content on node '{node_id}': {source}")]
    Content {
        node_id: String,
        source: serde_json::Error,
    },

    /// An expression or predicate inside the node failed to parse
    #[error("failed to parse expression on node '{node_id}': {source}")]
    Expression {
        node_id: String,
        source: ParseError,
    },
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
