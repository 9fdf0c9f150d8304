//! Verdict Compiler - JDM documents to execution plans
//!
//! Compilation is where every load-time guarantee is established: the graph
//! is structurally validated, node kinds are resolved to typed variants,
//! and every expression, table cell, and switch condition is parsed to an
//! AST. A document that compiles cannot fail with a parse error at
//! evaluation time.

pub mod compile;
pub mod error;
pub mod validate;

pub use compile::PlanCompiler;
pub use error::{CompileError, Result};
