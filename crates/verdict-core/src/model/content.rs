//! Kind-specific node content payloads

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decision-table and switch hit policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitPolicy {
    /// Stop at the first matching rule or statement
    #[default]
    First,
    /// Gather the outputs of every matching rule or statement
    Collect,
}

/// Content of an expression node: ordered `target path -> expression` pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionContent {
    pub expressions: IndexMap<String, String>,
}

/// Content of a decision-table node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTableContent {
    #[serde(default)]
    pub hit_policy: HitPolicy,

    #[serde(default)]
    pub inputs: Vec<InputColumn>,

    #[serde(default)]
    pub outputs: Vec<OutputColumn>,

    /// Rules as `column id -> cell` maps, in declaration order
    #[serde(default)]
    pub rules: Vec<IndexMap<String, String>>,
}

/// An input column of a decision table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputColumn {
    pub id: String,

    /// Dotted path into the context; when absent, cell predicates are
    /// evaluated against the whole context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// An output column of a decision table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputColumn {
    pub id: String,

    /// Dotted path in the rule's output object
    pub field: String,
}

/// Content of a switch node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchContent {
    #[serde(default)]
    pub hit_policy: HitPolicy,

    #[serde(default)]
    pub statements: Vec<SwitchStatement>,
}

/// A single switch statement routing to edges tagged with its id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchStatement {
    pub id: String,

    /// Predicate source; empty means always true
    #[serde(default)]
    pub condition: String,

    #[serde(default)]
    pub is_default: bool,
}
