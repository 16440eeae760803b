//! SessionManager — concurrent per-session tracking via DashMap.
//!
//! Each session publishes its status through a watch channel; the
//! manager holds the receiving end plus the cancellation token, so
//! `get_artifact` is a cheap snapshot read and `wait_terminal` is a
//! subscription, not a poll loop.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use solver_core::model::{SessionId, SessionStatus};

/// Tracking entry for one live or finished session.
#[derive(Clone)]
pub struct SessionEntry {
    status: watch::Receiver<SessionStatus>,
    cancel: CancellationToken,
}

/// Thread-safe session registry.
pub struct SessionManager {
    sessions: Arc<DashMap<SessionId, SessionEntry>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Register a new session. Returns the publisher side for the
    /// session task and the cancellation token it must observe.
    pub fn register(
        &self,
        id: SessionId,
    ) -> (watch::Sender<SessionStatus>, CancellationToken) {
        let (tx, rx) = watch::channel(SessionStatus::Pending);
        let cancel = CancellationToken::new();
        self.sessions.insert(
            id,
            SessionEntry {
                status: rx,
                cancel: cancel.clone(),
            },
        );
        (tx, cancel)
    }

    /// Snapshot of a session's status. `None` for unknown ids.
    pub fn status(&self, id: &SessionId) -> Option<SessionStatus> {
        self.sessions.get(id).map(|e| e.status.borrow().clone())
    }

    /// Request cooperative cancellation. The session observes the token
    /// between stages, never mid-stage. Returns false for unknown ids.
    pub fn cancel(&self, id: &SessionId) -> bool {
        match self.sessions.get(id) {
            Some(entry) => {
                entry.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Await a terminal status for the session. `None` for unknown ids.
    pub async fn wait_terminal(&self, id: &SessionId) -> Option<SessionStatus> {
        let mut rx = self.sessions.get(id)?.status.clone();
        loop {
            let snapshot = rx.borrow().clone();
            if snapshot.is_terminal() {
                return Some(snapshot);
            }
            // The sender is dropped only after a terminal send; a closed
            // channel still exposes the last value via borrow above.
            if rx.changed().await.is_err() {
                return Some(rx.borrow().clone());
            }
        }
    }

    /// Drop a session's tracking entry. The artifact dies with it.
    pub fn remove(&self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
