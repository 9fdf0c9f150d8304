//! Verdict SDK - the decision engine facade
//!
//! ```no_run
//! use std::sync::Arc;
//! use verdict_repository::FileSystemRepository;
//! use verdict_sdk::DecisionEngine;
//! use verdict_core::Value;
//!
//! # #[tokio::main]
//! # async fn main() -> verdict_sdk::Result<()> {
//! let engine = DecisionEngine::new(Arc::new(FileSystemRepository::new("decisions")));
//! let context = Value::from(serde_json::json!({"customer": {"age": 30}}));
//! let outcome = engine.evaluate("pricing/tiers", &context).await?;
//! println!("{:?}", outcome.result);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

pub use builder::DecisionEngineBuilder;
pub use config::EngineConfig;
pub use engine::DecisionEngine;
pub use error::{EngineError, Result};

// Re-export the types callers interact with
pub use verdict_core::model::DecisionDocument;
pub use verdict_core::Value;
pub use verdict_runtime::{EvaluationOptions, EvaluationResult, TraceEntry};
