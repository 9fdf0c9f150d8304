//! Runtime values flowing between decision nodes
//!
//! The `Value` enum mirrors the JSON data model: null, booleans, IEEE 754
//! doubles, strings, arrays, and objects. Objects preserve insertion order,
//! which is observable in evaluation results.

use crate::error::{CoreError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (insertion-ordered key-value map)
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Create an empty object value
    pub fn empty_object() -> Self {
        Value::Object(IndexMap::new())
    }

    /// Human-readable name of this value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Truthiness used by `!` and logical short-circuiting.
    ///
    /// False, null, zero, the empty string, the empty array, and the empty
    /// object are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }

    /// Look up a direct child of an object value
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Read a dotted path (e.g. `customer.address.city`).
    ///
    /// Missing keys and descents through non-objects yield `Null` rather
    /// than an error, matching the soft-lookup convention of the expression
    /// language.
    pub fn get_path(&self, path: &str) -> Value {
        let mut current = self;
        for segment in path.split('.') {
            match current.get_key(segment) {
                Some(v) => current = v,
                None => return Value::Null,
            }
        }
        current.clone()
    }

    /// Write a dotted path, creating intermediate objects as needed.
    ///
    /// Fails with a type mismatch when an intermediate segment already
    /// exists and is not an object, or when `self` is not an object.
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<()> {
        let mut current = self;
        let segments: Vec<&str> = path.split('.').collect();
        let (last, intermediate) = segments
            .split_last()
            .expect("split('.') yields at least one segment");

        for segment in intermediate {
            let map = match current {
                Value::Object(map) => map,
                other => {
                    return Err(CoreError::TypeMismatch(format!(
                        "cannot write into {} at segment '{}' of path '{}'",
                        other.type_name(),
                        segment,
                        path
                    )))
                }
            };
            current = map
                .entry((*segment).to_string())
                .or_insert_with(Value::empty_object);
        }

        match current {
            Value::Object(map) => {
                map.insert((*last).to_string(), value);
                Ok(())
            }
            other => Err(CoreError::TypeMismatch(format!(
                "cannot write into {} at segment '{}' of path '{}'",
                other.type_name(),
                last,
                path
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(!Value::Array(vec![]).is_truthy());
        assert!(!Value::empty_object().is_truthy());

        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(-1.0).is_truthy());
        assert!(Value::String("x".to_string()).is_truthy());
        assert!(Value::Array(vec![Value::Null]).is_truthy());
        assert!(Value::from(json!({"a": 1})).is_truthy());
    }

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(Value::from(json!({"a": [1, "x"]})), Value::from(json!({"a": [1, "x"]})));
        // no numeric coercion across types
        assert_ne!(Value::Number(1.0), Value::String("1".to_string()));
    }

    #[test]
    fn test_get_path() {
        let v = Value::from(json!({"customer": {"age": 30, "tags": ["vip"]}}));
        assert_eq!(v.get_path("customer.age"), Value::Number(30.0));
        assert_eq!(v.get_path("customer.missing"), Value::Null);
        // descending through a non-object yields null
        assert_eq!(v.get_path("customer.age.x"), Value::Null);
        assert_eq!(v.get_path("missing.deeply.nested"), Value::Null);
    }

    #[test]
    fn test_set_path_creates_intermediates() {
        let mut v = Value::empty_object();
        v.set_path("a.b.c", Value::Number(3.0)).unwrap();
        assert_eq!(v, Value::from(json!({"a": {"b": {"c": 3}}})));
    }

    #[test]
    fn test_set_path_overwrites_leaf() {
        let mut v = Value::from(json!({"a": {"b": 1}}));
        v.set_path("a.b", Value::Number(2.0)).unwrap();
        assert_eq!(v.get_path("a.b"), Value::Number(2.0));
    }

    #[test]
    fn test_set_path_rejects_non_object_intermediate() {
        let mut v = Value::from(json!({"a": 5}));
        let err = v.set_path("a.b", Value::Null).unwrap_err();
        assert!(err.to_string().contains("type mismatch"));
    }

    #[test]
    fn test_object_preserves_insertion_order() {
        let mut v = Value::empty_object();
        v.set_path("zebra", Value::Number(1.0)).unwrap();
        v.set_path("apple", Value::Number(2.0)).unwrap();
        match v {
            Value::Object(map) => {
                let keys: Vec<&String> = map.keys().collect();
                assert_eq!(keys, ["zebra", "apple"]);
            }
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let raw = json!({"n": 1.5, "s": "hi", "b": true, "nil": null, "arr": [1, 2]});
        let value = Value::from(raw.clone());
        let back: serde_json::Value = value.into();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_serde_untagged() {
        let value: Value = serde_json::from_str(r#"{"x": [1, "a", false]}"#).unwrap();
        assert_eq!(value.get_path("x"), Value::from(json!([1, "a", false])));
    }
}
