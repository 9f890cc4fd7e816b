//! Warden Policy - deterministic risk classification for agent operations.
//!
//! The [`PolicyEngine`] is the trust boundary between an untrusted reasoning
//! process and the host machine. Every tool implementation is required to
//! call [`PolicyEngine::evaluate`] (or [`PolicyEngine::evaluate_for_task`]
//! inside a governed task) before acting, and to honor the returned
//! [`Decision`](warden_core::Decision).
//!
//! # Check layers
//!
//! 1. **Deny-by-default**: operation kinds outside the closed set are blocked.
//! 2. **Sensitive paths**: a fixed deny-list of system and credential
//!    locations blocks before any allow-list is consulted.
//! 3. **Allow-list containment**: file paths must resolve (through symlinks)
//!    into a configured allowed directory.
//! 4. **Command safety**: dangerous substrings and shell-injection patterns
//!    block; a configurable read-only allow-list is low risk; the remainder
//!    is medium and gated.
//! 5. **URL safety**: loopback, private and link-local targets are blocked,
//!    including numerically obfuscated encodings.
//! 6. **Floors**: deletes and downloads are always high risk and gated;
//!    nothing can lower them.
//!
//! # Example
//!
//! ```
//! use warden_core::ToolOperation;
//! use warden_policy::{PolicyConfig, PolicyEngine};
//!
//! let config = PolicyConfig::default().with_allowed_directory("/tmp");
//! let engine = PolicyEngine::new(config);
//!
//! let decision = engine.evaluate(&ToolOperation::RunCommand {
//!     command: "git status".to_string(),
//!     working_dir: None,
//! });
//! assert!(decision.allowed);
//! assert!(!decision.requires_approval);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod commands;
pub mod config;
pub mod engine;
/// Error types and results for the policy module.
pub mod error;
pub mod paths;
pub mod scope;
pub mod urls;

pub use config::PolicyConfig;
pub use engine::PolicyEngine;
pub use error::{PolicyError, PolicyResult};
pub use paths::PathResolver;
pub use scope::TaskModeScope;
