//! Raw JSON Decision Model (JDM) documents
//!
//! These types match the wire format produced by graph editors. Node kinds
//! arrive as raw strings and kind-specific payloads as raw JSON; both are
//! resolved to typed plan nodes by the compiler, so an unrecognized kind is
//! reported as `UnknownNodeKind` instead of a deserialization failure.

pub mod content;
pub mod document;

pub use content::{
    DecisionTableContent, ExpressionContent, HitPolicy, InputColumn, OutputColumn, SwitchContent,
    SwitchStatement,
};
pub use document::{
    DecisionDocument, Edge, Node, KIND_DECISION_TABLE, KIND_EXPRESSION, KIND_INPUT, KIND_OUTPUT,
    KIND_SWITCH,
};
