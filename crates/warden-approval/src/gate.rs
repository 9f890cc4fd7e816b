//! The approval gate.
//!
//! A concurrency-safe registry of in-flight approval requests. Insertion,
//! resolution, and expiry are the only mutators; each request is resolved
//! exactly once and removed from the pending table immediately on
//! resolution. Nothing is persisted - a process restart loses all pending
//! requests and the callers simply re-request.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{RwLock, oneshot};

use warden_core::{RiskLevel, Timestamp, UserId};

use crate::notify::{ApprovalNotifier, PendingNotice};
use crate::request::RequestId;
use crate::vocab;

/// Default approval timeout (5 minutes).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// A request waiting for a human answer.
struct Pending {
    notice: PendingNotice,
    /// Monotonic insertion order; free-text answers resolve the highest.
    seq: u64,
    responder: oneshot::Sender<bool>,
}

/// The outcome of a structured resolve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The request was resolved by this call.
    Resolved {
        /// The answer that was delivered.
        approved: bool,
    },
    /// The request was already resolved or has expired; nothing happened.
    AlreadyHandled,
    /// The responding identity is not in the authorized set.
    Unauthorized,
}

/// Asynchronous human-confirmation channel for gated operations.
pub struct ApprovalGate {
    /// In-flight requests keyed by id.
    pending: RwLock<HashMap<RequestId, Pending>>,
    /// Insertion counter backing the most-recent-first heuristic.
    next_seq: AtomicU64,
    /// Frontend channel the requests are broadcast over.
    notifier: Arc<dyn ApprovalNotifier>,
    /// Identities allowed to answer.
    authorized: Vec<UserId>,
    /// Hard deadline after which a request is denied.
    timeout: Duration,
}

impl ApprovalGate {
    /// Create a gate broadcasting over `notifier`, answerable by
    /// `authorized` users, with the default 5-minute timeout.
    #[must_use]
    pub fn new(
        notifier: Arc<dyn ApprovalNotifier>,
        authorized: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            notifier,
            authorized: authorized.into_iter().collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the approval timeout (builder style).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ask a human to confirm an operation; suspends until answered.
    ///
    /// Returns `true` only on an explicit approval. Rejection, timeout,
    /// and gate shutdown all return `false` and are indistinguishable to
    /// the caller - fail-closed by construction.
    pub async fn request(
        &self,
        tool: impl Into<String>,
        args: serde_json::Value,
        risk: RiskLevel,
        description: impl Into<String>,
    ) -> bool {
        let id = RequestId::new();
        let notice = PendingNotice {
            id: id.clone(),
            tool: tool.into(),
            args,
            risk,
            description: description.into(),
            created_at: Timestamp::now(),
        };

        let (tx, rx) = oneshot::channel();
        {
            let mut guard = self.pending.write().await;
            guard.insert(
                id.clone(),
                Pending {
                    notice: notice.clone(),
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    responder: tx,
                },
            );
        }

        if let Err(e) = self.notifier.notify_request(&notice).await {
            // Keep waiting anyway; the timeout denies if nobody answers.
            tracing::warn!(id = %id, "failed to broadcast approval request: {e}");
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(approved)) => approved,
            Ok(Err(_)) => {
                // Sender dropped without an answer.
                tracing::warn!(id = %id, "approval channel closed without an answer");
                false
            },
            Err(_) => self.expire(&id).await,
        }
    }

    /// Expire a timed-out request: remove it, tell the channel, deny.
    async fn expire(&self, id: &RequestId) -> bool {
        let removed = self.pending.write().await.remove(id);
        if let Some(pending) = removed {
            tracing::info!(id = %id, "approval request timed out; denying");
            if let Err(e) = self.notifier.notify_expired(&pending.notice).await {
                tracing::warn!(id = %id, "failed to announce expiry: {e}");
            }
        }
        false
    }

    /// Deliver a structured accept/reject signal for a specific request.
    ///
    /// Verifies the responder is authorized, then resolves at most once:
    /// answering an already-resolved or expired request is a no-op
    /// reported as [`ResolveOutcome::AlreadyHandled`].
    pub async fn resolve(&self, id: &RequestId, user: &UserId, approve: bool) -> ResolveOutcome {
        if !self.is_authorized(user) {
            tracing::warn!(id = %id, %user, "unauthorized approval attempt");
            return ResolveOutcome::Unauthorized;
        }

        let removed = self.pending.write().await.remove(id);
        match removed {
            Some(pending) => {
                // The requester may have timed out concurrently; that race
                // resolves to denial on their side regardless.
                let _ = pending.responder.send(approve);
                tracing::info!(id = %id, %user, approve, "approval resolved");
                ResolveOutcome::Resolved { approved: approve }
            },
            None => ResolveOutcome::AlreadyHandled,
        }
    }

    /// Interpret a free-text utterance as an answer.
    ///
    /// When the text classifies as affirmative or negative and at least one
    /// request is pending, resolves the **most recently created** pending
    /// request - not necessarily the one the human meant when several are
    /// outstanding. Frontends that want precision should use
    /// [`resolve`](Self::resolve) with an explicit id.
    ///
    /// Returns the delivered answer, or `None` if the user is not
    /// authorized, the text matches neither vocabulary, or nothing is
    /// pending.
    pub async fn resolve_text(&self, user: &UserId, text: &str) -> Option<bool> {
        if !self.is_authorized(user) {
            return None;
        }
        let approve = vocab::classify_utterance(text)?;

        let mut guard = self.pending.write().await;
        let latest = guard
            .iter()
            .max_by_key(|(_, p)| p.seq)
            .map(|(id, _)| id.clone())?;
        let pending = guard.remove(&latest)?;
        drop(guard);

        let _ = pending.responder.send(approve);
        tracing::info!(id = %latest, %user, approve, "approval resolved via free text");
        Some(approve)
    }

    /// Number of requests currently pending.
    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }

    /// Ids of pending requests, oldest first.
    pub async fn pending_ids(&self) -> Vec<RequestId> {
        let guard = self.pending.read().await;
        let mut items: Vec<(u64, RequestId)> =
            guard.iter().map(|(id, p)| (p.seq, id.clone())).collect();
        items.sort_by_key(|(seq, _)| *seq);
        items.into_iter().map(|(_, id)| id).collect()
    }

    fn is_authorized(&self, user: &UserId) -> bool {
        self.authorized.contains(user)
    }
}

impl std::fmt::Debug for ApprovalGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalGate")
            .field("authorized", &self.authorized)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
