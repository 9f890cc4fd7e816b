//! Policy decisions.
//!
//! A [`Decision`] is produced fresh for every evaluated operation and is
//! never mutated afterwards. Two invariants hold by construction:
//!
//! - `risk == Blocked` implies `allowed == false`
//! - `requires_approval == true` implies `allowed == true` (a disallowed
//!   action is refused, it never reaches the approval gate)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::RiskLevel;

/// The outcome of evaluating one operation against policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the operation may proceed at all.
    pub allowed: bool,
    /// Assessed risk level.
    pub risk: RiskLevel,
    /// Human-readable explanation of the classification.
    pub reason: String,
    /// Whether a human must confirm before execution.
    pub requires_approval: bool,
}

impl Decision {
    /// An operation that executes without confirmation.
    #[must_use]
    pub fn allow(risk: RiskLevel, reason: impl Into<String>) -> Self {
        debug_assert!(!risk.is_blocked(), "allow() called with Blocked risk");
        Self {
            allowed: true,
            risk,
            reason: reason.into(),
            requires_approval: false,
        }
    }

    /// An operation that may proceed once a human confirms it.
    #[must_use]
    pub fn gated(risk: RiskLevel, reason: impl Into<String>) -> Self {
        debug_assert!(risk.requires_approval(), "gated() needs Medium or High");
        Self {
            allowed: true,
            risk,
            reason: reason.into(),
            requires_approval: true,
        }
    }

    /// An unconditional refusal.
    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            risk: RiskLevel::Blocked,
            reason: reason.into(),
            requires_approval: false,
        }
    }

    /// Return this decision with approval waived and the reason annotated.
    ///
    /// Used by task mode when a gated decision falls inside the active
    /// scope. Has no effect on denied decisions.
    #[must_use]
    pub fn with_approval_waived(mut self, annotation: impl fmt::Display) -> Self {
        if self.allowed {
            self.requires_approval = false;
            self.reason = format!("{} ({annotation})", self.reason);
        }
        self
    }

    /// Check whether the operation was refused.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        !self.allowed
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if !self.allowed {
            "denied"
        } else if self.requires_approval {
            "needs approval"
        } else {
            "allowed"
        };
        write!(f, "[{}] {verdict}: {}", self.risk, self.reason)
    }
}
