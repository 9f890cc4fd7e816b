//! Audit entry types.

use serde::{Deserialize, Serialize};

use warden_core::{RiskLevel, Timestamp, UserId};

/// How an evaluated operation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Executed without needing confirmation.
    Allowed,
    /// Refused by policy.
    Denied,
    /// Confirmed by a human and executed.
    Approved,
    /// Refused by a human.
    Rejected,
    /// The approval window expired; refused by default.
    Timeout,
}

impl std::fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allowed => write!(f, "allowed"),
            Self::Denied => write!(f, "denied"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

/// One record in the audit trail.
///
/// Immutable once written. The trail answers "what did the agent try to
/// do, and was it allowed" - it is never consulted for current
/// authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the decision or execution happened.
    pub timestamp: Timestamp,
    /// Wire name of the tool/operation.
    pub tool: String,
    /// The arguments as supplied by the agent.
    pub args: serde_json::Value,
    /// Assessed risk at decision time.
    pub risk: RiskLevel,
    /// How it ended.
    pub outcome: AuditOutcome,
    /// The human who confirmed or refused, when one was involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Wall-clock execution time, for executed operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Truncated tool output, for executed operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Error text, for failed executions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn new(
        tool: impl Into<String>,
        args: serde_json::Value,
        risk: RiskLevel,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            timestamp: Timestamp::now(),
            tool: tool.into(),
            args,
            risk,
            outcome,
            user_id: None,
            execution_time_ms: None,
            result: None,
            error: None,
        }
    }

    /// Attach the confirming or refusing user.
    #[must_use]
    pub fn with_user(mut self, user: UserId) -> Self {
        self.user_id = Some(user);
        self
    }

    /// Attach execution timing.
    #[must_use]
    pub fn with_execution_time_ms(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Attach the (possibly truncated) execution result.
    #[must_use]
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Attach error text.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
