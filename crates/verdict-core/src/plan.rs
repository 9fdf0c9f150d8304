//! Compiled execution plans
//!
//! A `DecisionPlan` is the immutable, validated form of a JDM document:
//! node kinds resolved to typed variants, every expression and predicate
//! parsed to an AST, the topological order and adjacency precomputed. Plans
//! are shared (`Arc`) across concurrent evaluations; all mutable state lives
//! in the executor.

use crate::ast::Expression;
use crate::model::{Edge, HitPolicy};
use indexmap::IndexMap;
use std::collections::HashMap;

/// A compiled, ready-to-execute decision graph
#[derive(Debug, Clone)]
pub struct DecisionPlan {
    pub id: String,
    pub name: String,

    /// Compiled nodes keyed by node id
    pub nodes: IndexMap<String, PlanNode>,

    /// Node ids in topological order (lexicographic tie-break)
    pub order: Vec<String>,

    /// Inbound edges per node, sorted by the topological position of their
    /// source; fan-in merging relies on this order
    pub incoming: HashMap<String, Vec<Edge>>,

    /// Outbound edges per node, in edge declaration order
    pub outgoing: HashMap<String, Vec<Edge>>,
}

impl DecisionPlan {
    /// Look up a compiled node by id
    pub fn node(&self, id: &str) -> Option<&PlanNode> {
        self.nodes.get(id)
    }

    /// Inbound edges of a node (empty slice when it has none)
    pub fn incoming_edges(&self, id: &str) -> &[Edge] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Outbound edges of a node (empty slice when it has none)
    pub fn outgoing_edges(&self, id: &str) -> &[Edge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A compiled graph node
#[derive(Debug, Clone)]
pub struct PlanNode {
    pub id: String,
    pub name: String,
    pub kind: PlanNodeKind,
}

/// Typed node kinds with their pre-parsed payloads
#[derive(Debug, Clone)]
pub enum PlanNodeKind {
    /// Entry point; emits the caller context
    Input,
    /// Terminal sink; emits its inbound context
    Output,
    /// Ordered path assignments over the accumulating context
    Expression { assignments: Vec<PlanAssignment> },
    /// Rule table with hit policy
    DecisionTable(DecisionTablePlan),
    /// Conditional router over outgoing edges
    Switch(SwitchPlan),
}

impl PlanNodeKind {
    /// Wire name of this kind, as used in documents and traces
    pub fn kind_name(&self) -> &'static str {
        match self {
            PlanNodeKind::Input => crate::model::document::KIND_INPUT,
            PlanNodeKind::Output => crate::model::document::KIND_OUTPUT,
            PlanNodeKind::Expression { .. } => crate::model::document::KIND_EXPRESSION,
            PlanNodeKind::DecisionTable(_) => crate::model::document::KIND_DECISION_TABLE,
            PlanNodeKind::Switch(_) => crate::model::document::KIND_SWITCH,
        }
    }
}

/// One `target path = expression` pair of an expression node
#[derive(Debug, Clone)]
pub struct PlanAssignment {
    /// Dotted path written into the accumulating context
    pub target: String,
    /// Original expression source, kept for diagnostics
    pub source: String,
    pub expression: Expression,
}

/// Compiled decision table
#[derive(Debug, Clone)]
pub struct DecisionTablePlan {
    pub hit_policy: HitPolicy,
    pub inputs: Vec<PlanInputColumn>,
    pub outputs: Vec<PlanOutputColumn>,
    pub rules: Vec<PlanRule>,
}

/// Compiled input column
#[derive(Debug, Clone)]
pub struct PlanInputColumn {
    pub id: String,
    /// Dotted path into the context; `None` pins the whole context
    pub field: Option<String>,
}

/// Compiled output column
#[derive(Debug, Clone)]
pub struct PlanOutputColumn {
    pub id: String,
    pub field: String,
}

/// One compiled rule row; cells are aligned with the column vectors
#[derive(Debug, Clone)]
pub struct PlanRule {
    /// Input predicates; `None` means the cell was empty (always true)
    pub conditions: Vec<Option<Expression>>,
    /// Output expressions; `None` means the cell was absent (no assignment)
    pub outputs: Vec<Option<Expression>>,
}

/// Compiled switch
#[derive(Debug, Clone)]
pub struct SwitchPlan {
    pub hit_policy: HitPolicy,
    pub statements: Vec<PlanStatement>,
}

/// Compiled switch statement
#[derive(Debug, Clone)]
pub struct PlanStatement {
    pub id: String,
    /// `None` means the condition was empty (always true)
    pub condition: Option<Expression>,
    pub is_default: bool,
}
