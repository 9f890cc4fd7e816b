//! Notification channel toward the human-facing frontend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use warden_core::{RiskLevel, Timestamp};

use crate::error::ApprovalResult;
use crate::request::RequestId;

/// What a frontend needs to render one pending approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingNotice {
    /// The request this notice describes.
    pub id: RequestId,
    /// Wire name of the gated tool.
    pub tool: String,
    /// The arguments as supplied by the agent.
    pub args: serde_json::Value,
    /// Assessed risk, for the human-readable risk label.
    pub risk: RiskLevel,
    /// Human-readable action description.
    pub description: String,
    /// When the request was created.
    pub created_at: Timestamp,
}

/// Trait for frontends that present approval requests to humans.
///
/// Chat bots, CLIs, and web UIs implement this to render the request and
/// to forward the human's answer back into the gate - either
/// [`ApprovalGate::resolve`](crate::gate::ApprovalGate::resolve) with the
/// request id, or [`ApprovalGate::resolve_text`](crate::gate::ApprovalGate::resolve_text)
/// with raw user text.
#[async_trait]
pub trait ApprovalNotifier: Send + Sync {
    /// Broadcast a pending request to every authorized recipient.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::NotifyFailed`](crate::error::ApprovalError::NotifyFailed)
    /// when the channel cannot deliver. The gate logs the failure and keeps
    /// waiting; the timeout still denies if nobody ever answers.
    async fn notify_request(&self, notice: &PendingNotice) -> ApprovalResult<()>;

    /// Tell the channel that a request expired and was auto-denied.
    ///
    /// # Errors
    ///
    /// Same contract as [`notify_request`](Self::notify_request).
    async fn notify_expired(&self, notice: &PendingNotice) -> ApprovalResult<()>;
}

/// A notifier that only writes to the operational log.
///
/// Useful for headless runs and tests; with no human on the other end,
/// every gated request rides the timeout to denial.
#[derive(Debug, Clone, Copy)]
pub struct LoggingNotifier;

#[async_trait]
impl ApprovalNotifier for LoggingNotifier {
    async fn notify_request(&self, notice: &PendingNotice) -> ApprovalResult<()> {
        tracing::info!(
            id = %notice.id,
            tool = %notice.tool,
            risk = %notice.risk,
            "approval requested: {}",
            notice.description
        );
        Ok(())
    }

    async fn notify_expired(&self, notice: &PendingNotice) -> ApprovalResult<()> {
        tracing::info!(
            id = %notice.id,
            tool = %notice.tool,
            "approval request expired and was auto-denied"
        );
        Ok(())
    }
}
