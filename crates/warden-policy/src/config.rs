//! Policy configuration.
//!
//! [`PolicyConfig`] is loaded once at startup from TOML and is immutable for
//! the rest of the run, with two exceptions owned by the engine: live risk
//! overrides and the task-mode scope. Every field defaults to a safe,
//! production-ready value so that an empty file produces a working (if
//! restrictive) configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use warden_core::RiskLevel;

use crate::error::{PolicyError, PolicyResult};

/// Command substrings that are refused unconditionally.
///
/// Covers recursive deletion of the filesystem root, privilege escalation,
/// destructive disk operations, fork bombs, permission mass-changes, and
/// piping downloaded content into an interpreter.
const DEFAULT_BLOCKED_COMMANDS: &[&str] = &[
    "rm -rf /",
    "rm -rf /*",
    "rm -fr /",
    "sudo ",
    "su -",
    "su root",
    "mkfs",
    "dd if=",
    "dd of=/dev/",
    ":(){ :|:& };:",
    "chmod -R 777",
    "chmod 777 /",
    "chown -R",
    "shutdown",
    "reboot",
    "halt -f",
    "curl | sh",
    "curl | bash",
    "wget | sh",
    "wget | bash",
];

/// Read-only, informational commands classified low risk with no approval.
const DEFAULT_SAFE_COMMANDS: &[&str] = &[
    "ls",
    "pwd",
    "whoami",
    "date",
    "uptime",
    "uname",
    "df",
    "du",
    "ps",
    "which",
    "wc",
    "git status",
    "git log",
    "git diff",
    "git branch",
    "git show",
];

/// Process-wide policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Directories the agent may touch. A file operation whose resolved
    /// path falls outside every entry is blocked. Empty means no file
    /// access at all.
    pub allowed_directories: Vec<PathBuf>,

    /// Command substrings refused unconditionally.
    pub blocked_command_substrings: Vec<String>,

    /// Commands classified low risk with no approval required. An entry
    /// matches when the command line equals it or starts with it followed
    /// by whitespace.
    pub safe_commands: Vec<String>,

    /// Whether shell command execution is enabled at all.
    pub shell_enabled: bool,

    /// Whether web fetch/search/download tools are enabled at all.
    pub browser_enabled: bool,

    /// Whether file writes require human approval.
    pub require_approval_for_writes: bool,

    /// Per-tool-name risk overrides. An override short-circuits the
    /// built-in classification, except that `blocked` is non-negotiable
    /// and the delete/download floors cannot be lowered.
    pub risk_overrides: HashMap<String, RiskLevel>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            allowed_directories: Vec::new(),
            blocked_command_substrings: DEFAULT_BLOCKED_COMMANDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            safe_commands: DEFAULT_SAFE_COMMANDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            shell_enabled: true,
            browser_enabled: true,
            require_approval_for_writes: true,
            risk_overrides: HashMap::new(),
        }
    }
}

impl PolicyConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ConfigRead`] if the file cannot be read,
    /// [`PolicyError::ConfigParse`] if it is not valid TOML, or
    /// [`PolicyError::ConfigInvalid`] if it fails validation. Malformed
    /// configuration is startup-fatal; there is no guessed fallback.
    pub fn load(path: impl AsRef<Path>) -> PolicyResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| PolicyError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ConfigInvalid`] for relative allow-list
    /// entries (besides `~` forms) and for overrides naming no known tool.
    pub fn validate(&self) -> PolicyResult<()> {
        for dir in &self.allowed_directories {
            let text = dir.to_string_lossy();
            if !dir.is_absolute() && !text.starts_with('~') {
                return Err(PolicyError::ConfigInvalid(format!(
                    "allowed directory '{text}' must be absolute or home-relative"
                )));
            }
        }

        if self.allowed_directories.is_empty() {
            tracing::warn!("no allowed directories configured; all file access will be blocked");
        }

        Ok(())
    }

    /// Add an allowed directory (builder style).
    #[must_use]
    pub fn with_allowed_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.allowed_directories.push(dir.into());
        self
    }

    /// Set a risk override for a tool name (builder style).
    #[must_use]
    pub fn with_risk_override(mut self, tool: impl Into<String>, level: RiskLevel) -> Self {
        self.risk_overrides.insert(tool.into(), level);
        self
    }
}
