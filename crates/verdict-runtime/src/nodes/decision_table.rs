//! Decision-table interpreter
//!
//! Rules are tried in declared order. A rule matches when every input cell
//! predicate holds with `$` pinned to the column's field value (or to the
//! whole context for field-less columns). Matching rules build a fresh
//! output object by assigning each output cell at its column's field path;
//! the table's output replaces the inbound context downstream.

use crate::error::Result;
use crate::evaluator::Evaluator;
use verdict_core::model::HitPolicy;
use verdict_core::plan::{DecisionTablePlan, PlanRule};
use verdict_core::Value;

/// Evaluate a decision table against a context
pub fn evaluate(table: &DecisionTablePlan, context: &Value) -> Result<Value> {
    // column field values are fixed for the whole table scan
    let column_values: Vec<Option<Value>> = table
        .inputs
        .iter()
        .map(|column| column.field.as_deref().map(|field| context.get_path(field)))
        .collect();

    match table.hit_policy {
        HitPolicy::First => {
            for rule in &table.rules {
                if rule_matches(rule, &column_values, context)? {
                    return build_output(table, rule, context);
                }
            }
            Ok(Value::empty_object())
        }
        HitPolicy::Collect => {
            let mut collected = Vec::new();
            for rule in &table.rules {
                if rule_matches(rule, &column_values, context)? {
                    collected.push(build_output(table, rule, context)?);
                }
            }
            Ok(Value::Array(collected))
        }
    }
}

fn rule_matches(
    rule: &PlanRule,
    column_values: &[Option<Value>],
    context: &Value,
) -> Result<bool> {
    for (condition, column_value) in rule.conditions.iter().zip(column_values) {
        let Some(predicate) = condition else {
            continue; // empty cell, always true
        };
        let pinned = column_value.as_ref().unwrap_or(context);
        let result = Evaluator::with_pinned(context, pinned).evaluate(predicate)?;
        if !result.is_truthy() {
            return Ok(false);
        }
    }
    Ok(true)
}

fn build_output(table: &DecisionTablePlan, rule: &PlanRule, context: &Value) -> Result<Value> {
    let mut output = Value::empty_object();
    for (expression, column) in rule.outputs.iter().zip(&table.outputs) {
        let Some(expression) = expression else {
            continue;
        };
        let value = Evaluator::new(context).evaluate(expression)?;
        output.set_path(&column.field, value)?;
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use verdict_core::plan::{PlanInputColumn, PlanOutputColumn};
    use verdict_parser::{ExpressionParser, PredicateParser};

    /// Age-tier table used across the tests
    fn tier_table(hit_policy: HitPolicy) -> DecisionTablePlan {
        let rows = [
            ("< 18", "\"minor\""),
            ("[18..65]", "\"adult\""),
            ("> 65", "\"senior\""),
        ];
        DecisionTablePlan {
            hit_policy,
            inputs: vec![PlanInputColumn {
                id: "c-age".to_string(),
                field: Some("customer.age".to_string()),
            }],
            outputs: vec![PlanOutputColumn {
                id: "c-tier".to_string(),
                field: "tier".to_string(),
            }],
            rules: rows
                .iter()
                .map(|(condition, output)| PlanRule {
                    conditions: vec![PredicateParser::parse(condition).unwrap()],
                    outputs: vec![Some(ExpressionParser::parse(output).unwrap())],
                })
                .collect(),
        }
    }

    #[test]
    fn test_first_returns_first_match() {
        let table = tier_table(HitPolicy::First);
        let context = Value::from(json!({"customer": {"age": 30}}));
        assert_eq!(
            evaluate(&table, &context).unwrap(),
            Value::from(json!({"tier": "adult"}))
        );
    }

    #[test]
    fn test_first_without_match_is_empty_object() {
        let mut table = tier_table(HitPolicy::First);
        table.rules.truncate(1); // only the "< 18" row survives
        let context = Value::from(json!({"customer": {"age": 30}}));
        assert_eq!(evaluate(&table, &context).unwrap(), Value::empty_object());
    }

    #[test]
    fn test_collect_gathers_all_matches() {
        let mut table = tier_table(HitPolicy::Collect);
        // overlapping rows: >= 18 also matches [18..65] for age 30
        table.rules[2].conditions = vec![PredicateParser::parse(">= 18").unwrap()];
        table.rules[2].outputs =
            vec![Some(ExpressionParser::parse("\"grown-up\"").unwrap())];

        let context = Value::from(json!({"customer": {"age": 30}}));
        assert_eq!(
            evaluate(&table, &context).unwrap(),
            Value::from(json!([{"tier": "adult"}, {"tier": "grown-up"}]))
        );
    }

    #[test]
    fn test_first_equals_head_of_collect() {
        let first = tier_table(HitPolicy::First);
        let collect = tier_table(HitPolicy::Collect);
        let context = Value::from(json!({"customer": {"age": 70}}));

        let single = evaluate(&first, &context).unwrap();
        match evaluate(&collect, &context).unwrap() {
            Value::Array(items) => assert_eq!(items[0], single),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_fieldless_column_pins_whole_context() {
        let table = DecisionTablePlan {
            hit_policy: HitPolicy::First,
            inputs: vec![PlanInputColumn {
                id: "c1".to_string(),
                field: None,
            }],
            outputs: vec![PlanOutputColumn {
                id: "o1".to_string(),
                field: "ok".to_string(),
            }],
            rules: vec![PlanRule {
                conditions: vec![PredicateParser::parse("$.score > 10").unwrap()],
                outputs: vec![Some(ExpressionParser::parse("true").unwrap())],
            }],
        };
        let context = Value::from(json!({"score": 50}));
        assert_eq!(
            evaluate(&table, &context).unwrap(),
            Value::from(json!({"ok": true}))
        );
    }

    #[test]
    fn test_output_expressions_read_the_context() {
        let table = DecisionTablePlan {
            hit_policy: HitPolicy::First,
            inputs: vec![PlanInputColumn {
                id: "c1".to_string(),
                field: Some("amount".to_string()),
            }],
            outputs: vec![PlanOutputColumn {
                id: "o1".to_string(),
                field: "fee".to_string(),
            }],
            rules: vec![PlanRule {
                conditions: vec![PredicateParser::parse("> 100").unwrap()],
                outputs: vec![Some(ExpressionParser::parse("amount * 0.1").unwrap())],
            }],
        };
        let context = Value::from(json!({"amount": 250}));
        assert_eq!(
            evaluate(&table, &context).unwrap(),
            Value::from(json!({"fee": 25.0}))
        );
    }

    #[test]
    fn test_dotted_output_field() {
        let table = DecisionTablePlan {
            hit_policy: HitPolicy::First,
            inputs: vec![],
            outputs: vec![PlanOutputColumn {
                id: "o1".to_string(),
                field: "decision.outcome".to_string(),
            }],
            rules: vec![PlanRule {
                conditions: vec![],
                outputs: vec![Some(ExpressionParser::parse("\"approve\"").unwrap())],
            }],
        };
        assert_eq!(
            evaluate(&table, &Value::empty_object()).unwrap(),
            Value::from(json!({"decision": {"outcome": "approve"}}))
        );
    }
}
