//! Operator semantics
//!
//! Arithmetic requires numeric operands. Equality is structural without
//! coercion. Ordering is defined on number pairs and string pairs only.

use crate::error::{Result, RuntimeError};
use verdict_core::ast::{BinaryOperator, UnaryOperator};
use verdict_core::Value;

/// Execute an arithmetic operation
pub(crate) fn arithmetic(left: &Value, op: BinaryOperator, right: &Value) -> Result<Value> {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(RuntimeError::TypeMismatch(format!(
            "'{}' expects numbers, got {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        )));
    };

    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => {
            if *b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            a / b
        }
        BinaryOperator::Mod => {
            if *b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            a % b
        }
        other => {
            return Err(RuntimeError::TypeMismatch(format!(
                "'{}' is not an arithmetic operator",
                other.symbol()
            )))
        }
    };
    Ok(Value::Number(result))
}

/// Execute a comparison operation
pub(crate) fn compare(left: &Value, op: BinaryOperator, right: &Value) -> Result<Value> {
    let result = match op {
        // structural, no coercion
        BinaryOperator::Eq => left == right,
        BinaryOperator::Ne => left != right,
        _ => {
            let ordering = match (left, right) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                _ => {
                    return Err(RuntimeError::TypeMismatch(format!(
                        "'{}' expects two numbers or two strings, got {} and {}",
                        op.symbol(),
                        left.type_name(),
                        right.type_name()
                    )))
                }
            };
            let Some(ordering) = ordering else {
                // NaN compares false against everything
                return Ok(Value::Bool(false));
            };
            match op {
                BinaryOperator::Lt => ordering.is_lt(),
                BinaryOperator::Le => ordering.is_le(),
                BinaryOperator::Gt => ordering.is_gt(),
                BinaryOperator::Ge => ordering.is_ge(),
                _ => unreachable!("comparison operator"),
            }
        }
    };
    Ok(Value::Bool(result))
}

/// Execute a unary operation
pub(crate) fn unary(op: UnaryOperator, operand: &Value) -> Result<Value> {
    match op {
        UnaryOperator::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOperator::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(RuntimeError::TypeMismatch(format!(
                "'-' expects a number, got {}",
                other.type_name()
            ))),
        },
    }
}

/// Index access, following the soft-lookup convention: anything that does
/// not resolve yields null.
pub(crate) fn index(object: &Value, index: &Value) -> Value {
    match (object, index) {
        (Value::Array(items), Value::Number(n)) => {
            if n.fract() != 0.0 || *n < 0.0 {
                return Value::Null;
            }
            items.get(*n as usize).cloned().unwrap_or(Value::Null)
        }
        (Value::Object(map), Value::String(key)) => {
            map.get(key).cloned().unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_modulo_by_zero() {
        assert!(matches!(
            arithmetic(&Value::Number(5.0), BinaryOperator::Mod, &Value::Number(0.0)),
            Err(RuntimeError::DivisionByZero)
        ));
    }

    #[test]
    fn test_structural_equality_on_containers() {
        let a = Value::from(json!({"x": [1, 2]}));
        let b = Value::from(json!({"x": [1, 2]}));
        assert_eq!(compare(&a, BinaryOperator::Eq, &b).unwrap(), Value::Bool(true));
        assert_eq!(compare(&a, BinaryOperator::Ne, &b).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_index_softness() {
        let arr = Value::from(json!([10, 20]));
        assert_eq!(index(&arr, &Value::Number(0.5)), Value::Null);
        assert_eq!(index(&arr, &Value::Number(-1.0)), Value::Null);
        assert_eq!(index(&arr, &Value::String("0".into())), Value::Null);
        assert_eq!(index(&Value::Null, &Value::Number(0.0)), Value::Null);

        let obj = Value::from(json!({"k": 1}));
        assert_eq!(index(&obj, &Value::String("k".into())), Value::Number(1.0));
        assert_eq!(index(&obj, &Value::String("m".into())), Value::Null);
    }
}
