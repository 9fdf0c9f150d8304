//! Evaluation results

use crate::trace::TraceEntry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use verdict_core::Value;

/// Performance metric key: total wall-clock time in milliseconds
pub const METRIC_EXECUTION_TIME_MS: &str = "execution_time_ms";
/// Performance metric key: number of nodes executed
pub const METRIC_NODE_COUNT: &str = "node_count";
/// Performance metric key: number of live edges consumed by fan-in
pub const METRIC_EDGES_TRAVERSED: &str = "edges_traversed";

/// Outcome of a successful evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The context emitted by the graph's output node(s)
    pub result: Value,

    /// Per-node trace, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceEntry>>,

    /// Aggregate metrics, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<IndexMap<String, Value>>,
}
