//! Expression node evaluator

use crate::error::Result;
use crate::evaluator::Evaluator;
use verdict_core::plan::PlanAssignment;
use verdict_core::Value;

/// Apply the node's assignments in declared order.
///
/// The node emits a fresh object holding only the assigned paths; the
/// inbound context is read, not carried through. Each expression is
/// evaluated against the inbound context overlaid with the assignments
/// made so far, so later expressions observe earlier writes.
pub fn evaluate(assignments: &[PlanAssignment], context: Value) -> Result<Value> {
    let mut environment = context;
    let mut output = Value::empty_object();
    for assignment in assignments {
        let value = Evaluator::new(&environment).evaluate(&assignment.expression)?;
        environment.set_path(&assignment.target, value.clone())?;
        output.set_path(&assignment.target, value)?;
    }
    Ok(output)
}
