//! Switch node evaluator
//!
//! Conditions are evaluated for truthiness with `$` pinned to the inbound
//! context; a missing condition is always true. Default statements fire
//! only when no condition matched. The context itself is not transformed.

use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::nodes::NodeOutcome;
use verdict_core::model::HitPolicy;
use verdict_core::plan::{PlanStatement, SwitchPlan};
use verdict_core::Value;

/// Evaluate a switch, returning the context and the matched statement ids
pub fn evaluate(switch: &SwitchPlan, context: Value) -> Result<NodeOutcome> {
    let mut matched = Vec::new();

    for statement in switch.statements.iter().filter(|s| !s.is_default) {
        if statement_matches(statement, &context)? {
            matched.push(statement.id.clone());
            if switch.hit_policy == HitPolicy::First {
                break;
            }
        }
    }

    if matched.is_empty() {
        matched.extend(
            switch
                .statements
                .iter()
                .filter(|s| s.is_default)
                .map(|s| s.id.clone()),
        );
    }

    Ok(NodeOutcome::Routed {
        context,
        statements: matched,
    })
}

fn statement_matches(statement: &PlanStatement, context: &Value) -> Result<bool> {
    match &statement.condition {
        None => Ok(true),
        Some(condition) => Ok(Evaluator::with_pinned(context, context)
            .evaluate(condition)?
            .is_truthy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use verdict_parser::ExpressionParser;

    fn statement(id: &str, condition: Option<&str>, is_default: bool) -> PlanStatement {
        PlanStatement {
            id: id.to_string(),
            condition: condition.map(|c| ExpressionParser::parse(c).unwrap()),
            is_default,
        }
    }

    fn routed_ids(outcome: NodeOutcome) -> Vec<String> {
        match outcome {
            NodeOutcome::Routed { statements, .. } => statements,
            other => panic!("expected routed outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_first_takes_first_match() {
        let switch = SwitchPlan {
            hit_policy: HitPolicy::First,
            statements: vec![
                statement("a", Some("x > 0"), false),
                statement("b", Some("x > -10"), false),
            ],
        };
        let ids = routed_ids(evaluate(&switch, Value::from(json!({"x": 5}))).unwrap());
        assert_eq!(ids, ["a"]);
    }

    #[test]
    fn test_default_fires_when_nothing_matches() {
        let switch = SwitchPlan {
            hit_policy: HitPolicy::First,
            statements: vec![
                statement("a", Some("x > 0"), false),
                statement("b", None, true),
            ],
        };
        let ids = routed_ids(evaluate(&switch, Value::from(json!({"x": -1}))).unwrap());
        assert_eq!(ids, ["b"]);
    }

    #[test]
    fn test_default_suppressed_when_a_condition_matches() {
        let switch = SwitchPlan {
            hit_policy: HitPolicy::Collect,
            statements: vec![
                statement("a", Some("x > 0"), false),
                statement("b", None, true),
            ],
        };
        let ids = routed_ids(evaluate(&switch, Value::from(json!({"x": 1}))).unwrap());
        assert_eq!(ids, ["a"]);
    }

    #[test]
    fn test_collect_takes_all_matches() {
        let switch = SwitchPlan {
            hit_policy: HitPolicy::Collect,
            statements: vec![
                statement("a", Some("x > 0"), false),
                statement("b", Some("x > -10"), false),
                statement("c", Some("x > 100"), false),
            ],
        };
        let ids = routed_ids(evaluate(&switch, Value::from(json!({"x": 5}))).unwrap());
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_empty_condition_always_matches() {
        let switch = SwitchPlan {
            hit_policy: HitPolicy::First,
            statements: vec![statement("a", None, false)],
        };
        let ids = routed_ids(evaluate(&switch, Value::empty_object()).unwrap());
        assert_eq!(ids, ["a"]);
    }

    #[test]
    fn test_context_passes_through_unchanged() {
        let switch = SwitchPlan {
            hit_policy: HitPolicy::First,
            statements: vec![statement("a", None, false)],
        };
        let context = Value::from(json!({"x": 1, "nested": {"y": 2}}));
        match evaluate(&switch, context.clone()).unwrap() {
            NodeOutcome::Routed { context: out, .. } => assert_eq!(out, context),
            other => panic!("expected routed outcome, got {:?}", other),
        }
    }
}
