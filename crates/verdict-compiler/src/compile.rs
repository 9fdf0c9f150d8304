//! Document compilation

use crate::error::{CompileError, Result};
use crate::validate;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashMap, HashSet};
use verdict_core::model::{
    DecisionDocument, DecisionTableContent, Edge, ExpressionContent, Node, SwitchContent,
    KIND_DECISION_TABLE, KIND_EXPRESSION, KIND_INPUT, KIND_OUTPUT, KIND_SWITCH,
};
use verdict_core::plan::{
    DecisionPlan, DecisionTablePlan, PlanAssignment, PlanInputColumn, PlanNode, PlanNodeKind,
    PlanOutputColumn, PlanRule, PlanStatement, SwitchPlan,
};
use verdict_parser::{ExpressionParser, PredicateParser};

/// Compiles validated documents into immutable execution plans
pub struct PlanCompiler;

impl PlanCompiler {
    /// Compile a document: validate the graph, resolve node kinds, parse
    /// every embedded expression, and precompute the execution order.
    pub fn compile(document: &DecisionDocument) -> Result<DecisionPlan> {
        validate::validate(document)?;

        let mut nodes = IndexMap::with_capacity(document.nodes.len());
        for node in document.nodes.values() {
            let kind = Self::compile_node(node)?;
            nodes.insert(
                node.id.clone(),
                PlanNode {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    kind,
                },
            );
        }

        let order = topological_order(document)?;
        let position: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut incoming: HashMap<String, Vec<Edge>> = HashMap::new();
        let mut outgoing: HashMap<String, Vec<Edge>> = HashMap::new();
        for edge in &document.edges {
            incoming
                .entry(edge.target_id.clone())
                .or_default()
                .push(edge.clone());
            outgoing
                .entry(edge.source_id.clone())
                .or_default()
                .push(edge.clone());
        }
        // fan-in merging consumes predecessors in topological order
        for edges in incoming.values_mut() {
            edges.sort_by_key(|e| position[e.source_id.as_str()]);
        }

        check_switch_wiring(&nodes, &outgoing)?;

        tracing::debug!(
            document = %document.id,
            nodes = nodes.len(),
            edges = document.edges.len(),
            "compiled decision plan"
        );

        Ok(DecisionPlan {
            id: document.id.clone(),
            name: document.name.clone(),
            nodes,
            order,
            incoming,
            outgoing,
        })
    }

    fn compile_node(node: &Node) -> Result<PlanNodeKind> {
        match node.kind.as_str() {
            KIND_INPUT => Ok(PlanNodeKind::Input),
            KIND_OUTPUT => Ok(PlanNodeKind::Output),
            KIND_EXPRESSION => {
                let content: ExpressionContent = Self::content(node)?;
                let mut assignments = Vec::with_capacity(content.expressions.len());
                for (target, source) in &content.expressions {
                    let expression = ExpressionParser::parse(source).map_err(|e| {
                        CompileError::Expression {
                            node_id: node.id.clone(),
                            source: e,
                        }
                    })?;
                    assignments.push(PlanAssignment {
                        target: target.clone(),
                        source: source.clone(),
                        expression,
                    });
                }
                Ok(PlanNodeKind::Expression { assignments })
            }
            KIND_DECISION_TABLE => {
                let content: DecisionTableContent = Self::content(node)?;
                Ok(PlanNodeKind::DecisionTable(Self::compile_table(
                    &node.id, content,
                )?))
            }
            KIND_SWITCH => {
                let content: SwitchContent = Self::content(node)?;
                let mut statements = Vec::with_capacity(content.statements.len());
                for statement in &content.statements {
                    let condition = if statement.condition.trim().is_empty() {
                        None
                    } else {
                        Some(ExpressionParser::parse(&statement.condition).map_err(|e| {
                            CompileError::Expression {
                                node_id: node.id.clone(),
                                source: e,
                            }
                        })?)
                    };
                    statements.push(PlanStatement {
                        id: statement.id.clone(),
                        condition,
                        is_default: statement.is_default,
                    });
                }
                Ok(PlanNodeKind::Switch(SwitchPlan {
                    hit_policy: content.hit_policy,
                    statements,
                }))
            }
            other => Err(CompileError::UnknownNodeKind {
                node_id: node.id.clone(),
                kind: other.to_string(),
            }),
        }
    }

    fn compile_table(node_id: &str, content: DecisionTableContent) -> Result<DecisionTablePlan> {
        let inputs: Vec<PlanInputColumn> = content
            .inputs
            .iter()
            .map(|c| PlanInputColumn {
                id: c.id.clone(),
                field: c.field.clone().filter(|f| !f.is_empty()),
            })
            .collect();
        let outputs: Vec<PlanOutputColumn> = content
            .outputs
            .iter()
            .map(|c| PlanOutputColumn {
                id: c.id.clone(),
                field: c.field.clone(),
            })
            .collect();

        let mut rules = Vec::with_capacity(content.rules.len());
        for cells in &content.rules {
            let mut conditions = Vec::with_capacity(inputs.len());
            for column in &inputs {
                let condition = match cells.get(&column.id) {
                    Some(cell) => {
                        PredicateParser::parse(cell).map_err(|e| CompileError::Expression {
                            node_id: node_id.to_string(),
                            source: e,
                        })?
                    }
                    None => None,
                };
                conditions.push(condition);
            }

            let mut rule_outputs = Vec::with_capacity(outputs.len());
            for column in &outputs {
                let output = match cells.get(&column.id).map(|c| c.trim()) {
                    Some(cell) if !cell.is_empty() => {
                        Some(ExpressionParser::parse(cell).map_err(|e| {
                            CompileError::Expression {
                                node_id: node_id.to_string(),
                                source: e,
                            }
                        })?)
                    }
                    _ => None,
                };
                rule_outputs.push(output);
            }

            rules.push(PlanRule {
                conditions,
                outputs: rule_outputs,
            });
        }

        Ok(DecisionTablePlan {
            hit_policy: content.hit_policy,
            inputs,
            outputs,
            rules,
        })
    }

    fn content<T: DeserializeOwned>(node: &Node) -> Result<T> {
        let raw = node
            .content
            .clone()
            .ok_or_else(|| CompileError::MissingContent {
                node_id: node.id.clone(),
            })?;
        serde_json::from_value(raw).map_err(|e| CompileError::Content {
            node_id: node.id.clone(),
            source: e,
        })
    }
}

/// Kahn's algorithm with a lexicographic tie-break over node ids; a
/// non-empty remainder means the graph has a cycle.
fn topological_order(document: &DecisionDocument) -> Result<Vec<String>> {
    let mut indegree: HashMap<&str, usize> = document
        .nodes
        .keys()
        .map(|id| (id.as_str(), 0))
        .collect();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &document.edges {
        *indegree.get_mut(edge.target_id.as_str()).expect("validated") += 1;
        successors
            .entry(edge.source_id.as_str())
            .or_default()
            .push(edge.target_id.as_str());
    }

    let mut ready: BTreeSet<&str> = indegree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut order = Vec::with_capacity(document.nodes.len());
    while let Some(&id) = ready.iter().next() {
        ready.remove(id);
        order.push(id.to_string());
        for &next in successors.get(id).into_iter().flatten() {
            let degree = indegree.get_mut(next).expect("validated");
            *degree -= 1;
            if *degree == 0 {
                ready.insert(next);
            }
        }
    }

    if order.len() != document.nodes.len() {
        let stuck: Vec<&str> = document
            .nodes
            .keys()
            .map(String::as_str)
            .filter(|id| !order.iter().any(|done| done == id))
            .collect();
        return Err(CompileError::InvalidGraph(format!(
            "cycle detected involving nodes: {}",
            stuck.join(", ")
        )));
    }
    Ok(order)
}

/// Every edge leaving a switch must carry a handle naming one of the
/// switch's statements; anything else would silently fan out to all
/// successors.
fn check_switch_wiring(
    nodes: &IndexMap<String, PlanNode>,
    outgoing: &HashMap<String, Vec<Edge>>,
) -> Result<()> {
    for (id, node) in nodes {
        let PlanNodeKind::Switch(switch) = &node.kind else {
            continue;
        };
        let statement_ids: HashSet<&str> =
            switch.statements.iter().map(|s| s.id.as_str()).collect();
        for edge in outgoing.get(id).into_iter().flatten() {
            match edge.source_handle.as_deref() {
                Some(handle) if statement_ids.contains(handle) => {}
                Some(handle) => {
                    return Err(CompileError::InvalidGraph(format!(
                        "edge '{}' leaving switch '{}' references unknown statement '{}'",
                        edge.id, id, handle
                    )))
                }
                None => {
                    return Err(CompileError::InvalidGraph(format!(
                        "edge '{}' leaving switch '{}' carries no statement handle",
                        edge.id, id
                    )))
                }
            }
        }
    }
    Ok(())
}
