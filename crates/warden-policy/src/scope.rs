//! Task-mode trust scope.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A temporarily relaxed policy scope, bounded to one task and one
/// working directory.
///
/// While a scope is active, medium-risk decisions whose paths resolve
/// inside `working_directory` skip the approval gate. High-risk and
/// blocked decisions are never relaxed. The engine holds at most one
/// scope at a time; it is created on task start and destroyed on task
/// completion, failure, or cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskModeScope {
    /// The task this scope belongs to.
    pub task_id: Uuid,
    /// Canonicalized directory the trust elevation is bounded to.
    pub working_directory: PathBuf,
}

impl TaskModeScope {
    /// Create a scope for a task bounded to a working directory.
    #[must_use]
    pub fn new(task_id: Uuid, working_directory: impl Into<PathBuf>) -> Self {
        Self {
            task_id,
            working_directory: working_directory.into(),
        }
    }

    /// Check whether a resolved path lies inside this scope.
    #[must_use]
    pub fn contains(&self, resolved: &Path) -> bool {
        resolved.starts_with(&self.working_directory)
    }
}
