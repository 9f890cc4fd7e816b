//! Step-by-step progress reporting toward the human-facing frontend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::plan::{StepStatus, TaskId};

/// One progress update, emitted on every step transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepProgress {
    /// The task being executed.
    pub task_id: TaskId,
    /// Zero-based index of the step.
    pub step_index: usize,
    /// Total number of steps in the plan.
    pub total_steps: usize,
    /// The step's description.
    pub description: String,
    /// The step's status after this transition.
    pub status: StepStatus,
}

/// Sink for progress updates (a chat frontend, typically).
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Deliver one update. Delivery failures are the sink's problem;
    /// execution never stalls on progress reporting.
    async fn report(&self, progress: &StepProgress);
}

/// A sink that only writes to the operational log.
#[derive(Debug, Clone, Copy)]
pub struct LoggingProgress;

#[async_trait]
impl ProgressSink for LoggingProgress {
    async fn report(&self, progress: &StepProgress) {
        tracing::info!(
            task = %progress.task_id,
            step = progress.step_index,
            total = progress.total_steps,
            status = %progress.status,
            "{}",
            progress.description
        );
    }
}
