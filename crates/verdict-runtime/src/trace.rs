//! Per-node execution traces

use serde::{Deserialize, Serialize};
use verdict_core::Value;

/// Record of a single node execution.
///
/// Snapshots are deep copies taken at execution time, so later nodes cannot
/// retroactively change what a trace entry shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Node id
    pub id: String,

    /// Node display name
    pub name: String,

    /// Node kind, e.g. `"decisionTableNode"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Context the node consumed
    pub input: Value,

    /// Context the node produced
    pub output: Value,

    /// Time spent inside the node
    pub execution_time_ms: f64,
}
