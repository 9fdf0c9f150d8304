//! Evaluation options

use serde::{Deserialize, Serialize};

/// Per-evaluation options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Record a per-node trace entry with input/output snapshots
    #[serde(default)]
    pub include_trace: bool,

    /// Report aggregate timing and counter metrics
    #[serde(default)]
    pub include_performance: bool,

    /// Wall-clock budget; checked between nodes, no mid-node preemption
    #[serde(default)]
    pub max_execution_time_ms: Option<u64>,
}

impl EvaluationOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable tracing
    pub fn with_trace(mut self) -> Self {
        self.include_trace = true;
        self
    }

    /// Enable performance metrics
    pub fn with_performance(mut self) -> Self {
        self.include_performance = true;
        self
    }

    /// Set the execution time limit in milliseconds
    pub fn with_max_execution_time_ms(mut self, limit: u64) -> Self {
        self.max_execution_time_ms = Some(limit);
        self
    }
}
