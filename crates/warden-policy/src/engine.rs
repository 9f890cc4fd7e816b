//! The policy engine.
//!
//! [`PolicyEngine`] owns the loaded [`PolicyConfig`], the path resolver
//! built from it, the live risk overrides, and the single optional
//! [`TaskModeScope`]. Evaluation is deterministic and side-effect-free
//! apart from filesystem path resolution; decisions are values, never
//! errors.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use warden_core::{Decision, RiskLevel, ToolArgs, ToolOperation};

use crate::commands::{self, CommandClass};
use crate::config::PolicyConfig;
use crate::error::{PolicyError, PolicyResult};
use crate::paths::{self, PathAssessment, PathResolver};
use crate::scope::TaskModeScope;
use crate::urls;

/// Deterministic risk classifier and keeper of the task-mode scope.
pub struct PolicyEngine {
    /// Immutable configuration, loaded once at startup.
    config: PolicyConfig,
    /// Containment tester built from the configured allow-list.
    resolver: PathResolver,
    /// Live per-tool risk overrides (seeded from config, mutable at runtime).
    overrides: RwLock<HashMap<String, RiskLevel>>,
    /// The single active task-mode scope, if any.
    scope: RwLock<Option<TaskModeScope>>,
}

impl PolicyEngine {
    /// Build an engine from loaded configuration.
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        let resolver = PathResolver::new(&config.allowed_directories);
        let overrides = RwLock::new(config.risk_overrides.clone());
        Self {
            config,
            resolver,
            overrides,
            scope: RwLock::new(None),
        }
    }

    /// Access the loaded configuration.
    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Evaluate a wire-format tool call.
    ///
    /// Names outside the closed operation set and calls with missing
    /// arguments are blocked - deny-by-default, there is no other path.
    #[must_use]
    pub fn evaluate_call(&self, name: &str, args: &ToolArgs) -> Decision {
        match ToolOperation::parse(name, args) {
            Ok(op) => self.evaluate(&op),
            Err(err) => {
                tracing::debug!(tool = name, "refusing unparseable operation: {err}");
                Decision::deny(err.to_string())
            },
        }
    }

    /// Evaluate an operation against policy.
    #[must_use]
    pub fn evaluate(&self, op: &ToolOperation) -> Decision {
        let builtin = self.classify(op);
        let decision = if builtin.is_denied() {
            builtin
        } else {
            self.apply_override(op, builtin)
        };
        tracing::debug!(
            tool = op.name(),
            risk = %decision.risk,
            allowed = decision.allowed,
            gated = decision.requires_approval,
            "policy decision"
        );
        decision
    }

    /// Evaluate an operation inside a governed task.
    ///
    /// Delegates to [`evaluate`](Self::evaluate), then - only when a scope
    /// is active, the decision is medium risk, and every path argument
    /// resolves inside the scope's working directory - waives the approval
    /// requirement. Blocked and high-risk decisions are never relaxed.
    #[must_use]
    pub fn evaluate_for_task(&self, op: &ToolOperation) -> Decision {
        let decision = self.evaluate(op);

        let guard = self.read_scope();
        let Some(scope) = guard.as_ref() else {
            return decision;
        };

        if decision.risk != RiskLevel::Medium || !decision.requires_approval {
            return decision;
        }

        if operation_within_scope(op, scope) {
            tracing::debug!(
                tool = op.name(),
                task = %scope.task_id,
                "approval waived inside task scope"
            );
            decision.with_approval_waived(format!(
                "auto-approved by task mode within {}",
                scope.working_directory.display()
            ))
        } else {
            decision
        }
    }

    /// Enter task mode, bounding trust elevation to `working_directory`.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::TaskModeActive`] if a scope is already held,
    /// or [`PolicyError::BadWorkingDirectory`] if the directory cannot be
    /// resolved.
    pub fn enter_task_mode(
        &self,
        task_id: Uuid,
        working_directory: &Path,
    ) -> PolicyResult<TaskModeScope> {
        let resolved = paths::resolve(&working_directory.to_string_lossy()).map_err(|reason| {
            PolicyError::BadWorkingDirectory {
                path: working_directory.to_path_buf(),
                reason,
            }
        })?;

        let mut guard = self.write_scope();
        if let Some(active) = guard.as_ref() {
            return Err(PolicyError::TaskModeActive {
                task_id: active.task_id,
            });
        }

        let scope = TaskModeScope::new(task_id, resolved);
        tracing::info!(task = %task_id, dir = %scope.working_directory.display(), "entering task mode");
        *guard = Some(scope.clone());
        Ok(scope)
    }

    /// Exit task mode, returning the scope that was active.
    pub fn exit_task_mode(&self) -> Option<TaskModeScope> {
        let scope = self.write_scope().take();
        if let Some(ref s) = scope {
            tracing::info!(task = %s.task_id, "exiting task mode");
        }
        scope
    }

    /// The currently active task-mode scope, if any.
    #[must_use]
    pub fn task_scope(&self) -> Option<TaskModeScope> {
        self.read_scope().clone()
    }

    /// Set a live risk override for a tool name.
    pub fn set_risk_override(&self, tool: impl Into<String>, level: RiskLevel) {
        self.write_overrides().insert(tool.into(), level);
    }

    /// Remove a live risk override.
    pub fn clear_risk_override(&self, tool: &str) {
        self.write_overrides().remove(tool);
    }

    // -- classification ----------------------------------------------------

    /// Built-in per-kind classification, before overrides.
    fn classify(&self, op: &ToolOperation) -> Decision {
        match op {
            ToolOperation::ReadFile { path } => match self.assess_path(path) {
                Err(denial) => denial,
                Ok(_) => Decision::allow(RiskLevel::Low, "read inside an allowed directory"),
            },
            ToolOperation::ListDirectory { path } => match self.assess_path(path) {
                Err(denial) => denial,
                Ok(_) => Decision::allow(RiskLevel::Safe, "listing inside an allowed directory"),
            },
            ToolOperation::SearchFiles { path, .. } => match self.assess_path(path) {
                Err(denial) => denial,
                Ok(_) => Decision::allow(RiskLevel::Low, "search inside an allowed directory"),
            },
            ToolOperation::WriteFile { path } => match self.assess_path(path) {
                Err(denial) => denial,
                Ok(_) => self.write_decision(),
            },
            ToolOperation::MoveFile {
                source,
                destination,
            } => {
                if let Err(denial) = self.assess_path(source) {
                    return denial;
                }
                if let Err(denial) = self.assess_path(destination) {
                    return denial;
                }
                self.write_decision()
            },
            ToolOperation::DeleteFile { path } => match self.assess_path(path) {
                Err(denial) => denial,
                Ok(_) => Decision::gated(RiskLevel::High, "file deletion is irreversible"),
            },
            ToolOperation::RunCommand {
                command,
                working_dir,
            } => self.classify_command(command, working_dir.as_deref()),
            ToolOperation::FetchPage { url } => {
                if !self.config.browser_enabled {
                    return Decision::deny("browser tools are disabled");
                }
                match urls::check_url(url) {
                    Err(issue) => Decision::deny(format!("unsafe URL: {issue}")),
                    Ok(_) => Decision::allow(RiskLevel::Low, "fetch from a public host"),
                }
            },
            ToolOperation::WebSearch { .. } => {
                if !self.config.browser_enabled {
                    return Decision::deny("browser tools are disabled");
                }
                Decision::allow(RiskLevel::Safe, "web search")
            },
            ToolOperation::DownloadFile { url, destination } => {
                if !self.config.browser_enabled {
                    return Decision::deny("browser tools are disabled");
                }
                if let Err(issue) = urls::check_url(url) {
                    return Decision::deny(format!("unsafe URL: {issue}"));
                }
                if let Err(denial) = self.assess_path(destination) {
                    return denial;
                }
                Decision::gated(RiskLevel::High, "download to local filesystem")
            },
        }
    }

    /// Resolve a path argument, mapping refusals to deny decisions.
    fn assess_path(&self, raw: &str) -> Result<(), Decision> {
        match self.resolver.assess(raw) {
            PathAssessment::Contained(_) => Ok(()),
            PathAssessment::Sensitive(resolved) => Err(Decision::deny(format!(
                "path {} resolves to a protected location",
                resolved.display()
            ))),
            PathAssessment::Outside(resolved) => Err(Decision::deny(format!(
                "path {} is outside every allowed directory",
                resolved.display()
            ))),
            PathAssessment::Unresolvable(reason) => Err(Decision::deny(reason)),
        }
    }

    /// Risk for write-class operations, per configuration.
    fn write_decision(&self) -> Decision {
        if self.config.require_approval_for_writes {
            Decision::gated(RiskLevel::Medium, "file write requires confirmation")
        } else {
            Decision::allow(RiskLevel::Low, "file write inside an allowed directory")
        }
    }

    fn classify_command(&self, command: &str, working_dir: Option<&str>) -> Decision {
        if !self.config.shell_enabled {
            return Decision::deny("shell execution is disabled");
        }

        if let Some(dir) = working_dir {
            if let Err(denial) = self.assess_path(dir) {
                return denial;
            }
        }

        match commands::classify(
            command,
            &self.config.blocked_command_substrings,
            &self.config.safe_commands,
        ) {
            CommandClass::Dangerous => Decision::deny("command contains a blocked pattern"),
            CommandClass::Injection => {
                Decision::deny("command contains shell injection constructs")
            },
            CommandClass::Safe => Decision::allow(RiskLevel::Low, "read-only command"),
            CommandClass::Unlisted => {
                Decision::gated(RiskLevel::Medium, "command requires confirmation")
            },
        }
    }

    /// Apply a configured or live risk override to an allowed decision.
    ///
    /// `blocked` overrides always win. Deletes and downloads have a high
    /// floor that an override cannot lower.
    fn apply_override(&self, op: &ToolOperation, builtin: Decision) -> Decision {
        let overrides = self.read_overrides();
        let Some(&level) = overrides.get(op.name()) else {
            return builtin;
        };

        if level.is_blocked() {
            return Decision::deny(format!("tool '{}' is blocked by risk override", op.name()));
        }

        let floored = match op {
            ToolOperation::DeleteFile { .. } | ToolOperation::DownloadFile { .. } => {
                level.max(RiskLevel::High)
            },
            _ => level,
        };

        let reason = format!("risk override for '{}'", op.name());
        if floored.requires_approval() {
            Decision::gated(floored, reason)
        } else {
            Decision::allow(floored, reason)
        }
    }

    // -- lock helpers ------------------------------------------------------

    fn read_scope(&self) -> std::sync::RwLockReadGuard<'_, Option<TaskModeScope>> {
        self.scope.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_scope(&self) -> std::sync::RwLockWriteGuard<'_, Option<TaskModeScope>> {
        self.scope.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_overrides(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, RiskLevel>> {
        self.overrides.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_overrides(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, RiskLevel>> {
        self.overrides.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Check whether every path argument of an operation resolves inside the
/// active task scope.
///
/// A `run_command` step with no explicit working directory inherits the
/// task's own directory (the governor injects it), so it counts as inside.
/// Operations without path arguments never qualify.
fn operation_within_scope(op: &ToolOperation, scope: &TaskModeScope) -> bool {
    let inside = |raw: &str| {
        paths::resolve(raw).is_ok_and(|resolved| scope.contains(&resolved))
    };

    match op {
        ToolOperation::ReadFile { path }
        | ToolOperation::WriteFile { path }
        | ToolOperation::ListDirectory { path }
        | ToolOperation::SearchFiles { path, .. }
        | ToolOperation::DeleteFile { path } => inside(path),
        ToolOperation::MoveFile {
            source,
            destination,
        } => inside(source) && inside(destination),
        ToolOperation::RunCommand { working_dir, .. } => {
            working_dir.as_deref().is_none_or(inside)
        },
        ToolOperation::FetchPage { .. }
        | ToolOperation::WebSearch { .. }
        | ToolOperation::DownloadFile { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn engine_with_dir(dir: &Path) -> PolicyEngine {
        PolicyEngine::new(PolicyConfig::default().with_allowed_directory(dir))
    }

    fn read_op(path: impl Into<String>) -> ToolOperation {
        ToolOperation::ReadFile { path: path.into() }
    }

    fn write_op(path: impl Into<String>) -> ToolOperation {
        ToolOperation::WriteFile { path: path.into() }
    }

    fn command_op(command: impl Into<String>) -> ToolOperation {
        ToolOperation::RunCommand {
            command: command.into(),
            working_dir: None,
        }
    }

    // -- path containment --------------------------------------------------

    #[test]
    fn test_read_outside_allowed_is_blocked() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());

        let target = other.path().join("x.txt").display().to_string();
        for op in [read_op(&target), write_op(&target)] {
            let d = engine.evaluate(&op);
            assert!(d.is_denied());
            assert_eq!(d.risk, RiskLevel::Blocked);
        }
    }

    #[test]
    fn test_read_inside_allowed_is_low() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());

        let target = dir.path().join("x.txt").display().to_string();
        let d = engine.evaluate(&read_op(target));
        assert!(d.allowed);
        assert_eq!(d.risk, RiskLevel::Low);
        assert!(!d.requires_approval);
    }

    #[test]
    fn test_symlink_escape_is_blocked() {
        let allowed = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("token");
        std::fs::write(&secret, "xyz").unwrap();
        let link = allowed.path().join("harmless");
        std::os::unix::fs::symlink(&secret, &link).unwrap();

        let engine = engine_with_dir(allowed.path());
        let d = engine.evaluate(&read_op(link.display().to_string()));
        assert!(d.is_denied());
    }

    #[test]
    fn test_sensitive_path_blocked_even_when_nominally_allowed() {
        let engine = PolicyEngine::new(PolicyConfig::default().with_allowed_directory("/"));
        let d = engine.evaluate(&read_op("/etc/passwd"));
        assert!(d.is_denied());
        assert!(d.reason.contains("protected"));
    }

    #[test]
    fn test_write_gated_medium_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());

        let d = engine.evaluate(&write_op(dir.path().join("out.txt").display().to_string()));
        assert!(d.allowed);
        assert_eq!(d.risk, RiskLevel::Medium);
        assert!(d.requires_approval);
    }

    #[test]
    fn test_write_low_when_config_relaxes() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PolicyConfig::default().with_allowed_directory(dir.path());
        config.require_approval_for_writes = false;
        let engine = PolicyEngine::new(config);

        let d = engine.evaluate(&write_op(dir.path().join("out.txt").display().to_string()));
        assert_eq!(d.risk, RiskLevel::Low);
        assert!(!d.requires_approval);
    }

    #[test]
    fn test_delete_always_high_gated() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());

        let d = engine.evaluate(&ToolOperation::DeleteFile {
            path: dir.path().join("x.txt").display().to_string(),
        });
        assert_eq!(d.risk, RiskLevel::High);
        assert!(d.requires_approval);
    }

    #[test]
    fn test_delete_floor_beats_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = PolicyConfig::default()
            .with_allowed_directory(dir.path())
            .with_risk_override("delete_file", RiskLevel::Low);
        let engine = PolicyEngine::new(config);

        let d = engine.evaluate(&ToolOperation::DeleteFile {
            path: dir.path().join("x.txt").display().to_string(),
        });
        assert_eq!(d.risk, RiskLevel::High);
        assert!(d.requires_approval);
    }

    // -- commands ----------------------------------------------------------

    #[test]
    fn test_dangerous_command_blocked() {
        let engine = PolicyEngine::new(PolicyConfig::default());
        for cmd in ["rm -rf /", "sudo rm x", "please run rm -rf / now"] {
            let d = engine.evaluate(&command_op(cmd));
            assert!(d.is_denied(), "expected denial for {cmd}");
            assert_eq!(d.risk, RiskLevel::Blocked);
        }
    }

    #[test]
    fn test_safe_commands_low() {
        let engine = PolicyEngine::new(PolicyConfig::default());
        for cmd in ["git status", "ls -la"] {
            let d = engine.evaluate(&command_op(cmd));
            assert_eq!(d.risk, RiskLevel::Low, "expected low for {cmd}");
            assert!(!d.requires_approval);
        }
    }

    #[test]
    fn test_unlisted_command_medium_gated() {
        let engine = PolicyEngine::new(PolicyConfig::default());
        let d = engine.evaluate(&command_op("npm install express"));
        assert_eq!(d.risk, RiskLevel::Medium);
        assert!(d.requires_approval);
    }

    #[test]
    fn test_shell_disabled() {
        let mut config = PolicyConfig::default();
        config.shell_enabled = false;
        let engine = PolicyEngine::new(config);
        assert!(engine.evaluate(&command_op("git status")).is_denied());
    }

    // -- URLs --------------------------------------------------------------

    #[test]
    fn test_internal_urls_blocked() {
        let engine = PolicyEngine::new(PolicyConfig::default());
        for url in [
            "http://127.0.0.1/",
            "http://192.168.1.1/",
            "http://0x7f000001/",
        ] {
            let d = engine.evaluate(&ToolOperation::FetchPage {
                url: url.to_string(),
            });
            assert!(d.is_denied(), "expected denial for {url}");
        }
    }

    #[test]
    fn test_public_fetch_low() {
        let engine = PolicyEngine::new(PolicyConfig::default());
        let d = engine.evaluate(&ToolOperation::FetchPage {
            url: "https://example.com/docs".to_string(),
        });
        assert_eq!(d.risk, RiskLevel::Low);
        assert!(!d.requires_approval);
    }

    #[test]
    fn test_download_high_gated() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());
        let d = engine.evaluate(&ToolOperation::DownloadFile {
            url: "https://example.com/tool.tar.gz".to_string(),
            destination: dir.path().join("tool.tar.gz").display().to_string(),
        });
        assert_eq!(d.risk, RiskLevel::High);
        assert!(d.requires_approval);
    }

    #[test]
    fn test_browser_disabled() {
        let mut config = PolicyConfig::default();
        config.browser_enabled = false;
        let engine = PolicyEngine::new(config);
        let d = engine.evaluate(&ToolOperation::WebSearch {
            query: "weather".to_string(),
        });
        assert!(d.is_denied());
    }

    // -- unknown kinds and overrides ---------------------------------------

    #[test]
    fn test_unknown_kind_blocked() {
        let engine = PolicyEngine::new(PolicyConfig::default());
        let d = engine.evaluate_call("hack_the_planet", &ToolArgs::new());
        assert!(d.is_denied());
        assert_eq!(d.risk, RiskLevel::Blocked);
    }

    #[test]
    fn test_override_raises_fetch_risk() {
        let config = PolicyConfig::default().with_risk_override("fetch_page", RiskLevel::Medium);
        let engine = PolicyEngine::new(config);
        let d = engine.evaluate(&ToolOperation::FetchPage {
            url: "https://example.com/".to_string(),
        });
        assert_eq!(d.risk, RiskLevel::Medium);
        assert!(d.requires_approval);
    }

    #[test]
    fn test_override_blocked_is_final() {
        let engine = PolicyEngine::new(PolicyConfig::default());
        engine.set_risk_override("web_search", RiskLevel::Blocked);
        let d = engine.evaluate(&ToolOperation::WebSearch {
            query: "anything".to_string(),
        });
        assert!(d.is_denied());

        engine.clear_risk_override("web_search");
        let d = engine.evaluate(&ToolOperation::WebSearch {
            query: "anything".to_string(),
        });
        assert!(d.allowed);
    }

    #[test]
    fn test_override_cannot_unblock_builtin_denial() {
        // An override on run_command does not resurrect a deny-listed command.
        let config = PolicyConfig::default().with_risk_override("run_command", RiskLevel::Safe);
        let engine = PolicyEngine::new(config);
        let d = engine.evaluate(&command_op("sudo id"));
        assert!(d.is_denied());
    }

    // -- task mode ---------------------------------------------------------

    #[test]
    fn test_task_mode_waives_medium_inside_scope() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());
        engine
            .enter_task_mode(Uuid::new_v4(), dir.path())
            .unwrap();

        let d = engine.evaluate_for_task(&write_op(
            dir.path().join("notes.md").display().to_string(),
        ));
        assert!(d.allowed);
        assert!(!d.requires_approval);
        assert!(d.reason.contains("task mode"));
    }

    #[test]
    fn test_task_mode_never_waives_high() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());
        engine
            .enter_task_mode(Uuid::new_v4(), dir.path())
            .unwrap();

        let d = engine.evaluate_for_task(&ToolOperation::DeleteFile {
            path: dir.path().join("notes.md").display().to_string(),
        });
        assert_eq!(d.risk, RiskLevel::High);
        assert!(d.requires_approval);
    }

    #[test]
    fn test_task_mode_bounded_to_scope_directory() {
        let scope_dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let config = PolicyConfig::default()
            .with_allowed_directory(scope_dir.path())
            .with_allowed_directory(outside.path());
        let engine = PolicyEngine::new(config);
        engine
            .enter_task_mode(Uuid::new_v4(), scope_dir.path())
            .unwrap();

        // Inside the broader allow-list but outside the task scope: still gated.
        let d = engine.evaluate_for_task(&write_op(
            outside.path().join("elsewhere.txt").display().to_string(),
        ));
        assert!(d.requires_approval);
    }

    #[test]
    fn test_task_mode_command_without_working_dir_is_waived() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());
        engine
            .enter_task_mode(Uuid::new_v4(), dir.path())
            .unwrap();

        let d = engine.evaluate_for_task(&command_op("npm install express"));
        assert!(d.allowed);
        assert!(!d.requires_approval);
    }

    #[test]
    fn test_no_scope_means_no_waiver() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());

        let d = engine.evaluate_for_task(&write_op(
            dir.path().join("notes.md").display().to_string(),
        ));
        assert!(d.requires_approval);
    }

    #[test]
    fn test_single_scope_invariant() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());
        engine
            .enter_task_mode(Uuid::new_v4(), dir.path())
            .unwrap();

        let err = engine
            .enter_task_mode(Uuid::new_v4(), dir.path())
            .unwrap_err();
        assert!(matches!(err, PolicyError::TaskModeActive { .. }));

        assert!(engine.exit_task_mode().is_some());
        assert!(engine.task_scope().is_none());
        assert!(engine.enter_task_mode(Uuid::new_v4(), dir.path()).is_ok());
    }

    #[test]
    fn test_bad_working_directory() {
        let engine = PolicyEngine::new(PolicyConfig::default());
        let err = engine
            .enter_task_mode(Uuid::new_v4(), &PathBuf::from("/work/../etc"))
            .unwrap_err();
        assert!(matches!(err, PolicyError::BadWorkingDirectory { .. }));
    }

    #[test]
    fn test_evaluate_call_parses_args() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with_dir(dir.path());

        let args = match json!({"path": dir.path().join("a.txt").display().to_string()}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let d = engine.evaluate_call("read_file", &args);
        assert!(d.allowed);

        let d = engine.evaluate_call("read_file", &ToolArgs::new());
        assert!(d.is_denied());
    }
}
