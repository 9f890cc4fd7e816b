//! Policy error types.
//!
//! These cover configuration and state errors only. A refused operation is
//! not an error - it is a `Decision { allowed: false, .. }` value.

use std::path::PathBuf;

/// Result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors from policy configuration and task-mode state.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A configuration file could not be read.
    #[error("failed to read policy config {path}: {source}")]
    ConfigRead {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("failed to parse policy config {path}: {source}")]
    ConfigParse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A configuration value failed validation.
    #[error("invalid policy config: {0}")]
    ConfigInvalid(String),

    /// Task mode was entered while another scope was already active.
    #[error("task mode already active for task {task_id}")]
    TaskModeActive {
        /// The task holding the active scope.
        task_id: uuid::Uuid,
    },

    /// The requested task-mode working directory could not be resolved.
    #[error("task working directory {path} could not be resolved: {reason}")]
    BadWorkingDirectory {
        /// The directory that failed to resolve.
        path: PathBuf,
        /// Why resolution failed.
        reason: String,
    },
}
