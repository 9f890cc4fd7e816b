//! Audit error types.

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Errors from the audit subsystem.
///
/// These surface only from explicit open/read operations. The hot path -
/// [`AuditSink::record`](crate::log::AuditSink::record) - swallows write
/// failures by design so that logging trouble never blocks an authorized
/// action.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The log file could not be opened.
    #[error("failed to open audit log {path}: {source}")]
    Open {
        /// Path to the log file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The log file could not be read back.
    #[error("failed to read audit log {path}: {source}")]
    Read {
        /// Path to the log file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A line in the log was not a valid entry.
    #[error("malformed audit entry at line {line}: {source}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
