//! The task governor.
//!
//! Owns the single tracked [`TaskPlan`], executes its steps strictly in
//! sequence under the policy engine's task-mode scope, reports progress,
//! and records every step in the audit trail.
//!
//! Execution is entered only from `AwaitingApproval`: the caller invokes
//! [`TaskGovernor::execute`] upon the human's approval of the whole plan,
//! and no step inside a running task ever waits on per-step approval -
//! a step the scope cannot cover simply fails.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tokio::sync::Mutex;

use warden_audit::{AuditEntry, AuditOutcome, AuditSink};
use warden_core::{RiskLevel, ToolArgs, ToolOperation};
use warden_policy::PolicyEngine;

use crate::error::{TaskError, TaskResult};
use crate::executor::ExecutorRegistry;
use crate::plan::{StepStatus, TaskId, TaskPlan, TaskStatus};
use crate::planner::{Planner, parse_planned_steps};
use crate::progress::{ProgressSink, StepProgress};

/// Result phrases that mean a tool refused to act.
///
/// Tools enforce policy themselves; a denial surfaces in their textual
/// output rather than as a transport error, so the governor pattern-matches
/// the result to classify the step.
const DENIAL_PHRASES: &[&str] = &[
    "not permitted",
    "permission denied",
    "denied by policy",
    "blocked by policy",
    "rejected by user",
    "approval required",
    "requires approval",
    "operation blocked",
];

/// Cap on result text carried into the audit trail.
const MAX_AUDIT_RESULT_CHARS: usize = 500;

/// How one step ended.
enum StepOutcome {
    /// The tool ran and its result looks like success.
    Completed {
        result: String,
        risk: RiskLevel,
        elapsed_ms: u64,
    },
    /// Policy (or the tool's own policy check) refused the step.
    Refused { reason: String, risk: RiskLevel },
    /// The step could not run or the tool errored.
    Errored { error: String, risk: RiskLevel },
}

/// Orchestrates governed execution of one plan at a time.
pub struct TaskGovernor {
    engine: Arc<PolicyEngine>,
    audit: Arc<dyn AuditSink>,
    planner: Arc<dyn Planner>,
    tools: Arc<ExecutorRegistry>,
    progress: Arc<dyn ProgressSink>,
    /// The single tracked plan.
    current: Mutex<Option<TaskPlan>>,
    /// Cooperative cancellation flag, checked between steps.
    cancel_requested: AtomicBool,
}

impl TaskGovernor {
    /// Create a governor wired to its collaborators.
    #[must_use]
    pub fn new(
        engine: Arc<PolicyEngine>,
        audit: Arc<dyn AuditSink>,
        planner: Arc<dyn Planner>,
        tools: Arc<ExecutorRegistry>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            engine,
            audit,
            planner,
            tools,
            progress,
            current: Mutex::new(None),
            cancel_requested: AtomicBool::new(false),
        }
    }

    /// Ask the external planner for a plan and track it.
    ///
    /// The returned plan is `AwaitingApproval`; nothing executes until a
    /// human approves the plan as a whole and the caller invokes
    /// [`execute`](Self::execute).
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskInProgress`] while a task is running, and
    /// [`TaskError::PlanningFailed`] when the planner's output cannot be
    /// parsed into at least one valid step.
    pub async fn plan(
        &self,
        description: &str,
        working_directory: Option<PathBuf>,
    ) -> TaskResult<TaskPlan> {
        {
            let guard = self.current.lock().await;
            if let Some(existing) = guard.as_ref() {
                if existing.status == TaskStatus::Running {
                    return Err(TaskError::TaskInProgress(existing.id));
                }
            }
        }

        let working_directory = match working_directory {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(|e| {
                TaskError::PlanningFailed(format!("working directory unavailable: {e}"))
            })?,
        };

        let raw = self.planner.propose(description, &working_directory).await?;
        let steps = parse_planned_steps(&raw)?;

        let plan = TaskPlan::new(description, steps, working_directory);
        tracing::info!(
            task = %plan.id,
            steps = plan.steps.len(),
            "plan ready; awaiting approval"
        );
        *self.current.lock().await = Some(plan.clone());
        Ok(plan)
    }

    /// Execute the tracked plan, step by step.
    ///
    /// Call this only after the human has approved the plan as a whole;
    /// the call itself is the `AwaitingApproval -> Running` transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::UnknownTask`] if `task_id` is not the tracked
    /// plan and [`TaskError::NotExecutable`] if the plan is not awaiting
    /// approval.
    pub async fn execute(&self, task_id: TaskId) -> TaskResult<TaskPlan> {
        let mut plan = {
            let mut guard = self.current.lock().await;
            let plan = guard.as_mut().ok_or(TaskError::UnknownTask(task_id))?;
            if plan.id != task_id {
                return Err(TaskError::UnknownTask(task_id));
            }
            if plan.status != TaskStatus::AwaitingApproval {
                return Err(TaskError::NotExecutable {
                    status: plan.status,
                });
            }
            plan.status = TaskStatus::Running;
            plan.clone()
        };

        self.cancel_requested.store(false, Ordering::SeqCst);
        tracing::info!(task = %plan.id, "task approved; executing");

        if let Err(e) = self
            .engine
            .enter_task_mode(plan.id.0, &plan.working_directory)
        {
            plan.skip_remaining();
            plan.finish(
                TaskStatus::Failed,
                Some(format!("could not enter task mode: {e}")),
            );
            self.store(&plan).await;
            return Ok(plan);
        }

        let total = plan.steps.len();
        for index in 0..total {
            if self.cancel_requested.load(Ordering::SeqCst) {
                tracing::info!(task = %plan.id, "cancellation requested; skipping remaining steps");
                plan.skip_remaining();
                plan.finish(TaskStatus::Cancelled, None);
                break;
            }

            plan.steps[index].status = StepStatus::Running;
            self.report(&plan, index).await;
            self.store(&plan).await;

            let step = plan.steps[index].clone();
            let effective_args = inject_working_dir(&step.tool, &step.args, &plan.working_directory);
            let (outcome, critical) = self.run_step(&step.tool, &effective_args).await;
            self.record_step(&step.tool, &effective_args, &outcome);

            match outcome {
                StepOutcome::Completed {
                    result, elapsed_ms, ..
                } => {
                    tracing::debug!(task = %plan.id, step = index, elapsed_ms, "step completed");
                    plan.steps[index].status = StepStatus::Completed;
                    plan.steps[index].result = Some(result);
                },
                StepOutcome::Refused { reason, .. } | StepOutcome::Errored { error: reason, .. } => {
                    tracing::warn!(task = %plan.id, step = index, "step failed: {reason}");
                    plan.steps[index].status = StepStatus::Failed;
                    plan.steps[index].error = Some(reason.clone());

                    if critical {
                        // A failed write or command likely invalidates the
                        // rest of the plan; stop here.
                        plan.skip_remaining();
                        plan.finish(
                            TaskStatus::Failed,
                            Some(format!("critical step {index} failed: {reason}")),
                        );
                    }
                },
            }

            self.report(&plan, index).await;
            self.store(&plan).await;

            if plan.status.is_terminal() {
                break;
            }
        }

        if !plan.status.is_terminal() {
            plan.finish(TaskStatus::Completed, None);
        }

        self.engine.exit_task_mode();
        self.store(&plan).await;
        tracing::info!(task = %plan.id, status = %plan.status, "task finished");
        Ok(plan)
    }

    /// Request cancellation of the tracked plan.
    ///
    /// Cooperative: a step already mid-execution finishes; only
    /// not-yet-started steps are skipped. Already-performed side effects
    /// stay performed - there is no rollback.
    ///
    /// Returns the plan as of this call, if one is tracked.
    pub async fn cancel(&self) -> Option<TaskPlan> {
        self.cancel_requested.store(true, Ordering::SeqCst);

        let mut guard = self.current.lock().await;
        let plan = guard.as_mut()?;
        if !plan.status.is_terminal() && plan.status != TaskStatus::Running {
            // Not running: nothing mid-flight, cancel immediately.
            plan.skip_remaining();
            plan.finish(TaskStatus::Cancelled, None);
            tracing::info!(task = %plan.id, "task cancelled before execution");
        }
        Some(plan.clone())
    }

    /// Snapshot the tracked plan, if any.
    pub async fn current_plan(&self) -> Option<TaskPlan> {
        self.current.lock().await.clone()
    }

    // -- internals ---------------------------------------------------------

    /// Evaluate, resolve, and run one step.
    ///
    /// Returns the outcome and whether the step's kind is critical (its
    /// failure aborts the task).
    async fn run_step(&self, tool: &str, args: &serde_json::Value) -> (StepOutcome, bool) {
        let arg_map = match to_arg_map(args) {
            Ok(map) => map,
            Err(reason) => {
                return (
                    StepOutcome::Errored {
                        error: reason,
                        risk: RiskLevel::Blocked,
                    },
                    false,
                );
            },
        };

        // Unknown kinds fail the step, never the task.
        let op = match ToolOperation::parse(tool, &arg_map) {
            Ok(op) => op,
            Err(err) => {
                return (
                    StepOutcome::Refused {
                        reason: err.to_string(),
                        risk: RiskLevel::Blocked,
                    },
                    false,
                );
            },
        };
        let critical = op.is_critical();

        let decision = self.engine.evaluate_for_task(&op);
        if !decision.allowed {
            return (
                StepOutcome::Refused {
                    reason: decision.reason,
                    risk: decision.risk,
                },
                critical,
            );
        }
        if decision.requires_approval {
            // Task mode could not cover this step, and steps never block
            // on a human mid-task.
            return (
                StepOutcome::Refused {
                    reason: format!("requires human approval: {}", decision.reason),
                    risk: decision.risk,
                },
                critical,
            );
        }

        let Some(executor) = self.tools.get(tool) else {
            return (
                StepOutcome::Errored {
                    error: format!("no executor registered for '{tool}'"),
                    risk: decision.risk,
                },
                critical,
            );
        };

        let started = Instant::now();
        match executor.execute(args).await {
            Ok(result) => {
                let elapsed_ms =
                    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                if looks_denied(&result) {
                    (
                        StepOutcome::Refused {
                            reason: result,
                            risk: decision.risk,
                        },
                        critical,
                    )
                } else {
                    (
                        StepOutcome::Completed {
                            result,
                            risk: decision.risk,
                            elapsed_ms,
                        },
                        critical,
                    )
                }
            },
            Err(e) => (
                StepOutcome::Errored {
                    error: e.to_string(),
                    risk: decision.risk,
                },
                critical,
            ),
        }
    }

    /// Write one audit entry for a step outcome.
    fn record_step(&self, tool: &str, args: &serde_json::Value, outcome: &StepOutcome) {
        let entry = match outcome {
            StepOutcome::Completed {
                result,
                risk,
                elapsed_ms,
            } => AuditEntry::new(tool, args.clone(), *risk, AuditOutcome::Allowed)
                .with_execution_time_ms(*elapsed_ms)
                .with_result(truncate_result(result)),
            StepOutcome::Refused { reason, risk } => {
                AuditEntry::new(tool, args.clone(), *risk, AuditOutcome::Denied)
                    .with_error(reason.clone())
            },
            StepOutcome::Errored { error, risk } => {
                AuditEntry::new(tool, args.clone(), *risk, AuditOutcome::Allowed)
                    .with_error(error.clone())
            },
        };
        self.audit.record(&entry);
    }

    async fn report(&self, plan: &TaskPlan, index: usize) {
        let step = &plan.steps[index];
        self.progress
            .report(&StepProgress {
                task_id: plan.id,
                step_index: index,
                total_steps: plan.steps.len(),
                description: step.description.clone(),
                status: step.status,
            })
            .await;
    }

    async fn store(&self, plan: &TaskPlan) {
        *self.current.lock().await = Some(plan.clone());
    }
}

impl std::fmt::Debug for TaskGovernor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGovernor")
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}

/// Convert a step's JSON args into the wire argument map.
fn to_arg_map(args: &serde_json::Value) -> Result<ToolArgs, String> {
    match args {
        serde_json::Value::Object(map) => Ok(map.clone()),
        serde_json::Value::Null => Ok(ToolArgs::new()),
        other => Err(format!("step arguments must be an object, got {other}")),
    }
}

/// Give command steps that named no working directory the task's own.
fn inject_working_dir(
    tool: &str,
    args: &serde_json::Value,
    working_directory: &std::path::Path,
) -> serde_json::Value {
    if tool != "run_command" {
        return args.clone();
    }
    let mut map = match args {
        serde_json::Value::Object(map) => map.clone(),
        _ => return args.clone(),
    };
    map.entry("working_dir").or_insert_with(|| {
        serde_json::Value::String(working_directory.to_string_lossy().into_owned())
    });
    serde_json::Value::Object(map)
}

/// Check a tool result for phrases that mean the tool refused to act.
fn looks_denied(result: &str) -> bool {
    let lowered = result.to_lowercase();
    DENIAL_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// Bound result text for the audit trail.
fn truncate_result(text: &str) -> String {
    if text.chars().count() > MAX_AUDIT_RESULT_CHARS {
        let truncated: String = text.chars().take(MAX_AUDIT_RESULT_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}
