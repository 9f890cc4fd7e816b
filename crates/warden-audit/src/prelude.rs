//! Prelude module - commonly used types for convenient import.
//!
//! Use `use warden_audit::prelude::*;` to import all essential types.

pub use crate::entry::{AuditEntry, AuditOutcome};
pub use crate::error::{AuditError, AuditResult};
pub use crate::log::{AuditSink, FileAuditLog, MemoryAuditLog};
