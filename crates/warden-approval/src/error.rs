//! Approval error types.

/// Result type for approval operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// Errors from the approval subsystem.
///
/// Denials are not errors - [`ApprovalGate::request`] returns `false` for
/// rejection and timeout alike. Errors here are delivery problems on the
/// notification channel.
///
/// [`ApprovalGate::request`]: crate::gate::ApprovalGate::request
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    /// The notification channel failed to deliver a message.
    #[error("failed to notify approvers: {0}")]
    NotifyFailed(String),
}
