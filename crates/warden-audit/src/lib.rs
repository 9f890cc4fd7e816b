//! Warden Audit - append-only record of every authorization decision.
//!
//! The audit log is a sink, never a source of truth: authorization is
//! re-evaluated fresh on every call, and nothing ever reads the log to
//! decide anything. Entries are newline-delimited JSON, one object per
//! line, appended by a single writer and never rewritten.
//!
//! A failed audit write must not turn an already-authorized action into a
//! refusal: [`AuditSink::record`] reports failures to the operational log
//! and returns.
//!
//! # Example
//!
//! ```
//! use warden_audit::{AuditEntry, AuditOutcome, AuditSink, MemoryAuditLog};
//! use warden_core::RiskLevel;
//!
//! let log = MemoryAuditLog::new();
//! log.record(&AuditEntry::new(
//!     "read_file",
//!     serde_json::json!({"path": "/work/notes.txt"}),
//!     RiskLevel::Low,
//!     AuditOutcome::Allowed,
//! ));
//! assert_eq!(log.entries().len(), 1);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod entry;
/// Error types and results for the audit module.
pub mod error;
pub mod log;
pub mod prelude;

pub use entry::{AuditEntry, AuditOutcome};
pub use error::{AuditError, AuditResult};
pub use log::{AuditSink, FileAuditLog, MemoryAuditLog, read_entries};
