//! Task plan and step types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use warden_core::Timestamp;

/// Unique identifier for a task plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Create a new random task ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task:{}", self.0)
    }
}

/// Unique identifier for a task step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub Uuid);

impl StepId {
    /// Create a new random step ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step:{}", self.0)
    }
}

/// Lifecycle of a task plan.
///
/// `Planning -> AwaitingApproval -> Running -> {Completed, Failed, Cancelled}`.
/// The transition into `Running` happens only through an explicit external
/// approval of the whole plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The planner is still producing steps.
    Planning,
    /// Waiting for a human to approve the plan as a whole.
    AwaitingApproval,
    /// Steps are executing.
    Running,
    /// Every step finished.
    Completed,
    /// A critical step failed; execution stopped.
    Failed,
    /// Cancelled by the human; remaining steps were skipped.
    Cancelled,
}

impl TaskStatus {
    /// Check if this is a terminal status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planning => write!(f, "planning"),
            Self::AwaitingApproval => write!(f, "awaiting_approval"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Lifecycle of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not started yet.
    Pending,
    /// Currently executing.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
    /// Never started; the task ended first.
    Skipped,
}

impl StepStatus {
    /// Check if this is a terminal status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Skipped)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// One tool call inside a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStep {
    /// Unique step identifier.
    pub id: StepId,
    /// What this step is for, in the planner's words.
    pub description: String,
    /// Wire name of the tool to invoke.
    pub tool: String,
    /// Arguments for the tool.
    pub args: serde_json::Value,
    /// Current status.
    pub status: StepStatus,
    /// Output of a completed step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Error of a failed step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskStep {
    /// Create a pending step.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        tool: impl Into<String>,
        args: serde_json::Value,
    ) -> Self {
        Self {
            id: StepId::new(),
            description: description.into(),
            tool: tool.into(),
            args,
            status: StepStatus::Pending,
            result: None,
            error: None,
        }
    }
}

/// A multi-step plan executed under one human approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPlan {
    /// Unique task identifier.
    pub id: TaskId,
    /// The task as the human described it.
    pub description: String,
    /// Steps, executed strictly in order.
    pub steps: Vec<TaskStep>,
    /// Directory the task-mode trust elevation is bounded to.
    pub working_directory: PathBuf,
    /// Current status.
    pub status: TaskStatus,
    /// When the plan was created.
    pub created_at: Timestamp,
    /// When the plan reached a terminal status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    /// Why the plan failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskPlan {
    /// Create a plan awaiting approval.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        steps: Vec<TaskStep>,
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            description: description.into(),
            steps,
            working_directory: working_directory.into(),
            status: TaskStatus::AwaitingApproval,
            created_at: Timestamp::now(),
            completed_at: None,
            error: None,
        }
    }

    /// Move the plan to a terminal status and stamp the completion time.
    pub fn finish(&mut self, status: TaskStatus, error: Option<String>) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.completed_at = Some(Timestamp::now());
        self.error = error;
    }

    /// Mark every non-terminal step skipped.
    pub fn skip_remaining(&mut self) {
        for step in &mut self.steps {
            if !step.status.is_terminal() {
                step.status = StepStatus::Skipped;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_plan_awaits_approval() {
        let plan = TaskPlan::new(
            "tidy the notes",
            vec![TaskStep::new("list notes", "list_directory", json!({"path": "/work"}))],
            "/work",
        );
        assert_eq!(plan.status, TaskStatus::AwaitingApproval);
        assert!(plan.completed_at.is_none());
        assert_eq!(plan.steps[0].status, StepStatus::Pending);
    }

    #[test]
    fn test_finish_stamps_completion() {
        let mut plan = TaskPlan::new("x", Vec::new(), "/work");
        plan.finish(TaskStatus::Failed, Some("step 2 failed".to_string()));
        assert_eq!(plan.status, TaskStatus::Failed);
        assert!(plan.completed_at.is_some());
        assert_eq!(plan.error.as_deref(), Some("step 2 failed"));
    }

    #[test]
    fn test_skip_remaining_leaves_terminal_steps() {
        let mut plan = TaskPlan::new(
            "x",
            vec![
                TaskStep::new("a", "read_file", json!({})),
                TaskStep::new("b", "read_file", json!({})),
            ],
            "/work",
        );
        plan.steps[0].status = StepStatus::Completed;
        plan.skip_remaining();
        assert_eq!(plan.steps[0].status, StepStatus::Completed);
        assert_eq!(plan.steps[1].status, StepStatus::Skipped);
    }

    #[test]
    fn test_status_terminality() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
        assert!(StepStatus::Skipped.is_terminal());
        assert!(!StepStatus::Pending.is_terminal());
    }
}
