//! Expression evaluator
//!
//! Tree-walking evaluation of cached ASTs against a value environment.
//! Identifier lookup is soft: unknown names resolve to null, which is how
//! optional context fields stay optional. `$` resolves to the pinned value
//! when one is set (decision-table predicates pin the cell's column value).

mod operators;

use crate::error::{Result, RuntimeError};
use verdict_core::ast::{BinaryOperator, Expression};
use verdict_core::Value;

/// Evaluates expressions against an environment
pub struct Evaluator<'a> {
    environment: &'a Value,
    pinned: Option<&'a Value>,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over an environment
    pub fn new(environment: &'a Value) -> Self {
        Evaluator {
            environment,
            pinned: None,
        }
    }

    /// Create an evaluator with `$` pinned to a value
    pub fn with_pinned(environment: &'a Value, pinned: &'a Value) -> Self {
        Evaluator {
            environment,
            pinned: Some(pinned),
        }
    }

    /// Evaluate an expression to a value
    pub fn evaluate(&self, expression: &Expression) -> Result<Value> {
        match expression {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::Identifier(name) => Ok(self.resolve(name)),

            Expression::Member { object, key } => {
                let object = self.evaluate(object)?;
                Ok(object.get_key(key).cloned().unwrap_or(Value::Null))
            }

            Expression::Index { object, index } => {
                let object = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                Ok(operators::index(&object, &index))
            }

            Expression::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                operators::unary(*op, &operand)
            }

            Expression::Binary { left, op, right } => match op {
                // short-circuit; the result is the last evaluated operand
                BinaryOperator::And => {
                    let left = self.evaluate(left)?;
                    if !left.is_truthy() {
                        return Ok(left);
                    }
                    self.evaluate(right)
                }
                BinaryOperator::Or => {
                    let left = self.evaluate(left)?;
                    if left.is_truthy() {
                        return Ok(left);
                    }
                    self.evaluate(right)
                }
                BinaryOperator::In => self.evaluate_membership(left, right),
                op if op.is_comparison() => {
                    let left = self.evaluate(left)?;
                    let right = self.evaluate(right)?;
                    operators::compare(&left, *op, &right)
                }
                _ => {
                    let left = self.evaluate(left)?;
                    let right = self.evaluate(right)?;
                    operators::arithmetic(&left, *op, &right)
                }
            },

            Expression::Range { .. } => Err(RuntimeError::TypeMismatch(
                "range literal is only valid on the right of 'in'".to_string(),
            )),
        }
    }

    fn resolve(&self, name: &str) -> Value {
        if name == "$" {
            if let Some(pinned) = self.pinned {
                return pinned.clone();
            }
        }
        self.environment
            .get_key(name)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// `a in r`: numeric containment when `r` is a range literal,
    /// structural membership when `r` evaluates to an array
    fn evaluate_membership(&self, left: &Expression, right: &Expression) -> Result<Value> {
        if let Expression::Range {
            low,
            high,
            low_inclusive,
            high_inclusive,
        } = right
        {
            let value = self.expect_number(left)?;
            let low = self.expect_number(low)?;
            let high = self.expect_number(high)?;
            let above = if *low_inclusive {
                value >= low
            } else {
                value > low
            };
            let below = if *high_inclusive {
                value <= high
            } else {
                value < high
            };
            return Ok(Value::Bool(above && below));
        }

        let needle = self.evaluate(left)?;
        match self.evaluate(right)? {
            Value::Array(items) => Ok(Value::Bool(items.contains(&needle))),
            other => Err(RuntimeError::TypeMismatch(format!(
                "'in' expects a range or array on the right, got {}",
                other.type_name()
            ))),
        }
    }

    fn expect_number(&self, expression: &Expression) -> Result<f64> {
        match self.evaluate(expression)? {
            Value::Number(n) => Ok(n),
            other => Err(RuntimeError::TypeMismatch(format!(
                "range containment expects numbers, got {}",
                other.type_name()
            ))),
        }
    }
}
