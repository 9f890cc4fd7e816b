//! Warden Tasks - governed execution of pre-approved multi-step plans.
//!
//! A task is a bounded list of tool calls proposed by an external planner,
//! approved **once as a whole** by a human, and then executed strictly in
//! sequence under task mode: a narrowly scoped trust elevation that lets
//! medium-risk steps inside the task's working directory run unattended
//! while high-risk and blocked operations stay gated as ever.
//!
//! The [`TaskGovernor`] owns the single active plan, drives the policy
//! engine's task-mode scope for its duration, reports per-step progress,
//! and records every step in the audit trail.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Error types and results for the task module.
pub mod error;
pub mod executor;
pub mod governor;
pub mod plan;
pub mod planner;
pub mod progress;

pub use error::{TaskError, TaskResult};
pub use executor::{ExecutorRegistry, ToolError, ToolExecutor};
pub use governor::TaskGovernor;
pub use plan::{StepId, StepStatus, TaskId, TaskPlan, TaskStatus, TaskStep};
pub use planner::{PlannedStep, Planner, parse_planned_steps};
pub use progress::{LoggingProgress, ProgressSink, StepProgress};
