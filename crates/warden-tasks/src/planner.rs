//! The external planner boundary.
//!
//! Plan generation itself (a language model) lives outside this crate;
//! the governor only consumes its structured output. The planner is
//! constrained to emit a JSON array of steps, each `{tool, args,
//! description}`, and parsing is strict: garbage in means a
//! [`TaskError::PlanningFailed`] out, never a guessed plan.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use crate::error::{TaskError, TaskResult};
use crate::plan::TaskStep;

/// Upper bound on steps in one plan.
const MAX_PLAN_STEPS: usize = 20;

/// One step as emitted by the planner.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannedStep {
    /// Wire name of the tool to invoke.
    pub tool: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub args: serde_json::Value,
    /// Human-readable description of the step.
    pub description: String,
}

/// Trait for external plan generators.
#[async_trait]
pub trait Planner: Send + Sync {
    /// Produce raw structured output (a JSON array of steps) for a task
    /// description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::PlanningFailed`] when no plan can be produced.
    async fn propose(&self, description: &str, working_directory: &Path) -> TaskResult<String>;
}

/// Parse and validate planner output into task steps.
///
/// # Errors
///
/// Returns [`TaskError::PlanningFailed`] when the output is not a JSON
/// array, contains no valid step, exceeds the step bound, or any step
/// names an empty tool.
pub fn parse_planned_steps(raw: &str) -> TaskResult<Vec<TaskStep>> {
    let planned: Vec<PlannedStep> = serde_json::from_str(raw)
        .map_err(|e| TaskError::PlanningFailed(format!("planner output is not a step list: {e}")))?;

    if planned.is_empty() {
        return Err(TaskError::PlanningFailed(
            "planner produced no steps; a clearer task description may help".to_string(),
        ));
    }
    if planned.len() > MAX_PLAN_STEPS {
        return Err(TaskError::PlanningFailed(format!(
            "planner produced {} steps (limit {MAX_PLAN_STEPS})",
            planned.len()
        )));
    }

    let mut steps = Vec::with_capacity(planned.len());
    for (index, step) in planned.into_iter().enumerate() {
        if step.tool.trim().is_empty() {
            return Err(TaskError::PlanningFailed(format!(
                "step {index} names no tool"
            )));
        }
        steps.push(TaskStep::new(step.description, step.tool, step.args));
    }
    Ok(steps)
}
