//! Structural validation of JDM documents
//!
//! Checks everything that can be decided without decoding node content:
//! node map integrity, edge endpoints, presence of input and output nodes,
//! reachability from inputs, and the successor requirement on non-output
//! nodes. Kind resolution, content decoding, switch wiring, and cycle
//! detection happen during compilation.

use crate::error::{CompileError, Result};
use std::collections::{HashMap, HashSet, VecDeque};
use verdict_core::model::{DecisionDocument, KIND_INPUT, KIND_OUTPUT};

/// Validate the node and edge structure of a document
pub fn validate(document: &DecisionDocument) -> Result<()> {
    if document.nodes.is_empty() {
        return Err(CompileError::InvalidGraph("document has no nodes".into()));
    }

    for (key, node) in &document.nodes {
        if key != &node.id {
            return Err(CompileError::InvalidGraph(format!(
                "node map key '{}' does not match node id '{}'",
                key, node.id
            )));
        }
    }

    for edge in &document.edges {
        for endpoint in [&edge.source_id, &edge.target_id] {
            if !document.nodes.contains_key(endpoint) {
                return Err(CompileError::InvalidGraph(format!(
                    "edge '{}' references unknown node '{}'",
                    edge.id, endpoint
                )));
            }
        }
    }

    let inputs: Vec<&str> = document
        .nodes
        .values()
        .filter(|n| n.kind == KIND_INPUT)
        .map(|n| n.id.as_str())
        .collect();
    if inputs.is_empty() {
        return Err(CompileError::InvalidGraph(
            "document has no input node".into(),
        ));
    }
    if !document.nodes.values().any(|n| n.kind == KIND_OUTPUT) {
        return Err(CompileError::InvalidGraph(
            "document has no output node".into(),
        ));
    }

    check_reachability(document, &inputs)?;

    let mut has_successor: HashSet<&str> = HashSet::new();
    for edge in &document.edges {
        has_successor.insert(edge.source_id.as_str());
    }
    for node in document.nodes.values() {
        if node.kind != KIND_OUTPUT && !has_successor.contains(node.id.as_str()) {
            return Err(CompileError::InvalidGraph(format!(
                "node '{}' has no outgoing edge",
                node.id
            )));
        }
    }

    Ok(())
}

/// Every non-input node must be reachable from some input node
fn check_reachability(document: &DecisionDocument, inputs: &[&str]) -> Result<()> {
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &document.edges {
        successors
            .entry(edge.source_id.as_str())
            .or_default()
            .push(edge.target_id.as_str());
    }

    let mut reached: HashSet<&str> = inputs.iter().copied().collect();
    let mut queue: VecDeque<&str> = inputs.iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        for &next in successors.get(id).into_iter().flatten() {
            if reached.insert(next) {
                queue.push_back(next);
            }
        }
    }

    for node in document.nodes.values() {
        if node.kind != KIND_INPUT && !reached.contains(node.id.as_str()) {
            return Err(CompileError::InvalidGraph(format!(
                "node '{}' is not reachable from any input node",
                node.id
            )));
        }
    }
    Ok(())
}
