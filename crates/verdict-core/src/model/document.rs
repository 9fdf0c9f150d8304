//! JDM document, node, and edge records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wire name of the input node kind
pub const KIND_INPUT: &str = "inputNode";
/// Wire name of the output node kind
pub const KIND_OUTPUT: &str = "outputNode";
/// Wire name of the decision-table node kind
pub const KIND_DECISION_TABLE: &str = "decisionTableNode";
/// Wire name of the expression node kind
pub const KIND_EXPRESSION: &str = "expressionNode";
/// Wire name of the switch node kind
pub const KIND_SWITCH: &str = "switchNode";

/// A JSON Decision Model document as loaded from a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDocument {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Nodes keyed by node id
    pub nodes: IndexMap<String, Node>,

    /// Directed edges between nodes, in declaration order
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl DecisionDocument {
    /// Parse a document from its JSON source
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }
}

/// A single graph node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Raw node kind, e.g. `"decisionTableNode"`
    #[serde(rename = "type")]
    pub kind: String,

    /// Kind-specific payload; absent for input and output nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

/// A directed edge between two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,

    pub source_id: String,

    pub target_id: String,

    /// For edges leaving a switch node: the id of the statement they carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_json() {
        let doc = DecisionDocument::from_json(
            r#"{
                "id": "d1",
                "name": "demo",
                "nodes": {
                    "in": {"id": "in", "name": "Request", "type": "inputNode"},
                    "out": {"id": "out", "name": "Response", "type": "outputNode"}
                },
                "edges": [
                    {"id": "e1", "sourceId": "in", "targetId": "out"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.id, "d1");
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes["in"].kind, KIND_INPUT);
        assert!(doc.nodes["in"].content.is_none());
        assert_eq!(doc.edges[0].source_id, "in");
        assert!(doc.edges[0].source_handle.is_none());
    }

    #[test]
    fn test_edge_source_handle() {
        let edge: Edge = serde_json::from_str(
            r#"{"id": "e1", "sourceId": "sw", "targetId": "n2", "sourceHandle": "stmt-a"}"#,
        )
        .unwrap();
        assert_eq!(edge.source_handle.as_deref(), Some("stmt-a"));
    }

    #[test]
    fn test_unrecognized_kind_survives_deserialization() {
        // kind strings are resolved later; loading must not reject them
        let node: Node =
            serde_json::from_str(r#"{"id": "x", "name": "", "type": "functionNode"}"#).unwrap();
        assert_eq!(node.kind, "functionNode");
    }
}
