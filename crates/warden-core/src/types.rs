//! Common types used throughout Warden.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level classification for operations.
///
/// The scale is ordered: `Safe < Low < Medium < High < Blocked`. `Blocked`
/// is a refusal, not a gradation - an operation classified `Blocked` never
/// executes, regardless of configuration or approvals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// No meaningful risk - executes without confirmation
    Safe,
    /// Low risk - executes without confirmation
    Low,
    /// Medium risk - requires human confirmation unless task mode covers it
    Medium,
    /// High risk - always requires human confirmation
    High,
    /// Refused unconditionally
    Blocked,
}

impl RiskLevel {
    /// Check if this risk level requires human approval before execution.
    #[must_use]
    pub fn requires_approval(self) -> bool {
        matches!(self, Self::Medium | Self::High)
    }

    /// Check if this risk level is an unconditional refusal.
    #[must_use]
    pub fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Timestamp wrapper for consistent handling throughout Warden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Get the current timestamp.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Check if this timestamp is in the past.
    #[must_use]
    pub fn is_past(&self) -> bool {
        self.0 < Utc::now()
    }

    /// Check if this timestamp is in the future.
    #[must_use]
    pub fn is_future(&self) -> bool {
        self.0 > Utc::now()
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

/// Frontend-specific identifier of a human user.
///
/// Opaque to the kernel - whatever the chat transport uses (a numeric
/// Telegram ID, a Discord snowflake, a login name) is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a user ID from a frontend-specific string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Safe < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Blocked);
    }

    #[test]
    fn test_risk_level_requires_approval() {
        assert!(!RiskLevel::Safe.requires_approval());
        assert!(!RiskLevel::Low.requires_approval());
        assert!(RiskLevel::Medium.requires_approval());
        assert!(RiskLevel::High.requires_approval());
        // Blocked never reaches the approval path - it is refused outright.
        assert!(!RiskLevel::Blocked.requires_approval());
    }

    #[test]
    fn test_risk_level_serde() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let level: RiskLevel = serde_json::from_str("\"blocked\"").unwrap();
        assert!(level.is_blocked());
    }

    #[test]
    fn test_timestamp() {
        let ts = Timestamp::now();
        assert!(!ts.is_future());

        let past = Timestamp::from_datetime(Utc::now() - chrono::Duration::hours(1));
        assert!(past.is_past());
    }

    #[test]
    fn test_user_id_display() {
        let id = UserId::new("12345");
        assert_eq!(id.to_string(), "user:12345");
        assert_eq!(id.as_str(), "12345");
    }
}
