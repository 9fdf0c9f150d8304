//! AST definitions for the embedded expression language

pub mod expression;
pub mod operator;

pub use expression::Expression;
pub use operator::{BinaryOperator, UnaryOperator};
