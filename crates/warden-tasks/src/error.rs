//! Task error types.

use crate::plan::{TaskId, TaskStatus};

/// Result type for task operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors from the task governor.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The external planner produced no parseable steps.
    ///
    /// Surfaced to the caller so the human can be asked for a clearer
    /// task description; never silently retried with a guessed plan.
    #[error("planning failed: {0}")]
    PlanningFailed(String),

    /// The identified task is not the currently tracked plan.
    #[error("no tracked task with id {0}")]
    UnknownTask(TaskId),

    /// A new plan was requested while a task is still running.
    #[error("task {0} is still running")]
    TaskInProgress(TaskId),

    /// The plan is not in a state from which it can be executed.
    #[error("task cannot be executed from status '{status}'")]
    NotExecutable {
        /// The status the plan is actually in.
        status: TaskStatus,
    },
}
