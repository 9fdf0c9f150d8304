//! Graph executor
//!
//! Walks the plan's precomputed topological order. Every node consumes the
//! fan-in merge of its live predecessors' outputs; a predecessor is live
//! when it executed and, for switch sources, when the connecting edge's
//! handle was among the matched statements. Nodes left with no live inbound
//! context are pruned together with everything only they feed.

use crate::error::{Result, RuntimeError};
use crate::nodes::{self, NodeOutcome};
use crate::options::EvaluationOptions;
use crate::result::{
    EvaluationResult, METRIC_EDGES_TRAVERSED, METRIC_EXECUTION_TIME_MS, METRIC_NODE_COUNT,
};
use crate::trace::TraceEntry;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use verdict_core::plan::{DecisionPlan, PlanNodeKind};
use verdict_core::Value;

/// Executes a compiled plan against caller contexts
pub struct GraphExecutor<'a> {
    plan: &'a DecisionPlan,
}

impl<'a> GraphExecutor<'a> {
    /// Create an executor over a plan
    pub fn new(plan: &'a DecisionPlan) -> Self {
        GraphExecutor { plan }
    }

    /// Run one evaluation
    pub fn execute(&self, context: &Value, options: &EvaluationOptions) -> Result<EvaluationResult> {
        let started = Instant::now();

        // node id -> produced context, for nodes that ran
        let mut outputs: HashMap<&str, Value> = HashMap::new();
        // switch node id -> statement ids taken this evaluation
        let mut taken_handles: HashMap<&str, HashSet<String>> = HashMap::new();
        let mut trace: Option<Vec<TraceEntry>> = options.include_trace.then(Vec::new);
        let mut node_count: usize = 0;
        let mut edges_traversed: usize = 0;
        let mut result: Option<Value> = None;

        for node_id in &self.plan.order {
            let node = self
                .plan
                .node(node_id)
                .expect("order only contains plan nodes");

            let input = if matches!(node.kind, PlanNodeKind::Input) {
                context.clone()
            } else {
                let mut contributions: Vec<&Value> = Vec::new();
                for edge in self.plan.incoming_edges(node_id) {
                    let Some(source_output) = outputs.get(edge.source_id.as_str()) else {
                        continue; // pruned predecessor
                    };
                    if let Some(taken) = taken_handles.get(edge.source_id.as_str()) {
                        let live = edge
                            .source_handle
                            .as_deref()
                            .is_some_and(|handle| taken.contains(handle));
                        if !live {
                            continue; // switch branch not taken
                        }
                    }
                    contributions.push(source_output);
                }
                if contributions.is_empty() {
                    tracing::debug!(node = %node_id, "pruned: no live inbound context");
                    continue;
                }
                edges_traversed += contributions.len();
                merge_contexts(&contributions)
            };

            let input_snapshot = trace.is_some().then(|| input.clone());
            let node_started = Instant::now();
            let outcome = nodes::evaluate(node, input).map_err(|e| RuntimeError::Node {
                node_id: node.id.clone(),
                kind: node.kind.kind_name(),
                source: Box::new(e),
            })?;
            let node_elapsed = node_started.elapsed();
            node_count += 1;

            let (output, statements) = match outcome {
                NodeOutcome::Context(value) => (value, None),
                NodeOutcome::Routed {
                    context,
                    statements,
                } => (context, Some(statements)),
            };

            if let Some(entries) = trace.as_mut() {
                entries.push(TraceEntry {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    kind: node.kind.kind_name().to_string(),
                    input: input_snapshot.expect("snapshot taken when tracing"),
                    output: output.clone(),
                    execution_time_ms: node_elapsed.as_secs_f64() * 1_000.0,
                });
            }

            if let Some(statements) = statements {
                taken_handles.insert(node_id.as_str(), statements.into_iter().collect());
            }

            if matches!(node.kind, PlanNodeKind::Output) {
                result = Some(match result.take() {
                    Some(previous) => merge_pair(previous, output.clone()),
                    None => output.clone(),
                });
            }
            outputs.insert(node_id.as_str(), output);

            if let Some(limit_ms) = options.max_execution_time_ms {
                if started.elapsed().as_millis() as u64 > limit_ms {
                    return Err(RuntimeError::Timeout { limit_ms });
                }
            }
        }

        let performance = options.include_performance.then(|| {
            let mut metrics = IndexMap::new();
            metrics.insert(
                METRIC_EXECUTION_TIME_MS.to_string(),
                Value::Number(started.elapsed().as_secs_f64() * 1_000.0),
            );
            metrics.insert(METRIC_NODE_COUNT.to_string(), Value::Number(node_count as f64));
            metrics.insert(
                METRIC_EDGES_TRAVERSED.to_string(),
                Value::Number(edges_traversed as f64),
            );
            metrics
        });

        Ok(EvaluationResult {
            result: result.unwrap_or_else(Value::empty_object),
            trace,
            performance,
        })
    }
}

/// Fan-in merge: fold the predecessor outputs in predecessor-topological
/// order, later contributions overwriting earlier ones.
fn merge_contexts(contributions: &[&Value]) -> Value {
    let mut iter = contributions.iter();
    let first = (*iter.next().expect("at least one contribution")).clone();
    iter.fold(first, |merged, next| merge_pair(merged, (*next).clone()))
}

/// Shallow merge with recursive descent on object-object collisions;
/// arrays and scalars are replaced, not concatenated.
fn merge_pair(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => {
                        let previous = std::mem::replace(existing, Value::Null);
                        *existing = merge_pair(previous, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}
