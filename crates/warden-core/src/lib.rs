//! Warden Core - shared vocabulary for the agent security kernel.
//!
//! Every other warden crate speaks in the types defined here: the ordered
//! [`RiskLevel`] scale, the closed [`ToolOperation`] enum over everything an
//! agent may attempt, and the [`Decision`] value that the policy engine
//! produces for each attempt.
//!
//! Decisions are ordinary data, never errors. A refused operation is a
//! `Decision { allowed: false, .. }` that the caller must inspect; there is
//! no exception path a caller could forget to catch.
//!
//! # Example
//!
//! ```
//! use warden_core::{Decision, RiskLevel, ToolOperation};
//!
//! let op = ToolOperation::DeleteFile {
//!     path: "/home/user/scratch/old.log".to_string(),
//! };
//! assert_eq!(op.name(), "delete_file");
//!
//! let decision = Decision::gated(RiskLevel::High, "file deletion is irreversible");
//! assert!(decision.allowed);
//! assert!(decision.requires_approval);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod decision;
pub mod operation;
pub mod prelude;
pub mod types;

pub use decision::Decision;
pub use operation::{OperationParseError, ToolArgs, ToolOperation};
pub use types::{RiskLevel, Timestamp, UserId};
