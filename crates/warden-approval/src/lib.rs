//! Warden Approval - human-in-the-loop confirmation for gated operations.
//!
//! The [`ApprovalGate`] suspends a caller until a human either confirms or
//! refuses the operation, or a hard timeout fires. Denial is the default
//! on every ambiguous path: timeout, dropped channel, unauthorized
//! responder - all fail closed.
//!
//! Two resolution paths are offered to the human, mirroring what a chat
//! frontend renders: a structured accept/reject signal referencing the
//! request id, and a free-text yes/no utterance matched against curated
//! vocabularies.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use warden_approval::{ApprovalGate, LoggingNotifier};
//! use warden_core::{RiskLevel, UserId};
//!
//! # async fn demo() {
//! let gate = Arc::new(ApprovalGate::new(
//!     Arc::new(LoggingNotifier),
//!     [UserId::new("owner")],
//! ));
//!
//! let approved = gate
//!     .request(
//!         "write_file",
//!         serde_json::json!({"path": "/work/notes.md"}),
//!         RiskLevel::Medium,
//!         "Write meeting notes to /work/notes.md",
//!     )
//!     .await;
//! if !approved {
//!     // rejected, timed out, or the gate shut down - all the same to us
//! }
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Error types and results for the approval module.
pub mod error;
pub mod gate;
pub mod notify;
pub mod request;
pub mod vocab;

pub use error::{ApprovalError, ApprovalResult};
pub use gate::{ApprovalGate, ResolveOutcome};
pub use notify::{ApprovalNotifier, LoggingNotifier, PendingNotice};
pub use request::RequestId;
pub use vocab::classify_utterance;
