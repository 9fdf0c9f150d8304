//! Node evaluators, one per node kind
//!
//! Each evaluator turns an inbound context into an outbound one. Input and
//! output nodes pass the context through untouched; they exist to mark the
//! graph's entry and exit. The executor wraps any error raised here with
//! the failing node's identity.

pub mod decision_table;
pub mod expression;
pub mod switch;

use crate::error::Result;
use verdict_core::plan::{PlanNode, PlanNodeKind};
use verdict_core::Value;

/// Result of evaluating a single node
#[derive(Debug)]
pub enum NodeOutcome {
    /// The node's output context
    Context(Value),
    /// A switch: the context passes through, routed onto the edges tagged
    /// with the matched statement ids
    Routed {
        context: Value,
        statements: Vec<String>,
    },
}

/// Dispatch evaluation over the node's kind
pub fn evaluate(node: &PlanNode, context: Value) -> Result<NodeOutcome> {
    match &node.kind {
        PlanNodeKind::Input | PlanNodeKind::Output => Ok(NodeOutcome::Context(context)),
        PlanNodeKind::Expression { assignments } => {
            expression::evaluate(assignments, context).map(NodeOutcome::Context)
        }
        PlanNodeKind::DecisionTable(table) => {
            decision_table::evaluate(table, &context).map(NodeOutcome::Context)
        }
        PlanNodeKind::Switch(switch) => switch::evaluate(switch, context),
    }
}
