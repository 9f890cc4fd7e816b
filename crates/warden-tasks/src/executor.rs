//! The tool execution contract and registry.
//!
//! Concrete tools (filesystem, shell, browser) live outside this crate.
//! What they owe the kernel: call the policy engine before acting, honor
//! the decision, and record the outcome in the audit trail. The governor
//! resolves executors by wire name; an unknown name fails the step, not
//! the task.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool execution errors.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Execution failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

/// A tool the governor can invoke on behalf of a plan step.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Wire name this executor answers to.
    fn name(&self) -> &'static str;

    /// Execute with the given arguments, returning the textual result.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] when the arguments are invalid or the
    /// underlying effect fails.
    async fn execute(&self, args: &serde_json::Value) -> Result<String, ToolError>;
}

/// Registry of tool executors, keyed by wire name.
#[derive(Default)]
pub struct ExecutorRegistry {
    tools: HashMap<&'static str, Arc<dyn ToolExecutor>>,
}

impl ExecutorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an executor under its own name.
    pub fn register(&mut self, tool: Arc<dyn ToolExecutor>) {
        self.tools.insert(tool.name(), tool);
    }

    /// Look up an executor by wire name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolExecutor>> {
        self.tools.get(name).cloned()
    }

    /// Number of registered executors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ExecutorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}
