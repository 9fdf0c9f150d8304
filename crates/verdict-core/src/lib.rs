//! Verdict Core - Core types for the verdict decision engine
//!
//! This crate provides the fundamental types used across the verdict
//! workspace:
//! - `Value`: the dynamic JSON-shaped value flowing between nodes
//! - AST definitions for the embedded expression language
//! - The raw JSON Decision Model (JDM) document as loaded from a repository
//! - The compiled execution plan consumed by the runtime

pub mod ast;
pub mod error;
pub mod model;
pub mod plan;
pub mod value;

// Re-export commonly used types
pub use error::CoreError;
pub use value::Value;
