//! Per-session visit counter
//!
//! Session state is an explicit map from session id to a visit count,
//! held in the `Services` container and injected into handlers. Counters
//! start at 0 and are incremented on each index view. The map is bounded:
//! once `max_sessions` ids are tracked, starting a new session evicts an
//! arbitrary existing one so unsolicited cookie traffic cannot grow the
//! map without limit.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Default cap on tracked sessions
const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Clone)]
pub struct SessionsService {
    visits: Arc<RwLock<HashMap<String, u64>>>,
    max_sessions: usize,
}

impl SessionsService {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }

    /// Cap the number of tracked sessions
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            visits: Arc::new(RwLock::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Mint a fresh session id
    pub fn new_session_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Increment and return the visit count for a session.
    /// A new session starts at 0, so its first view returns 1.
    pub async fn increment_visits(&self, session_id: &str) -> u64 {
        let mut visits = self.visits.write().await;

        if !visits.contains_key(session_id) && visits.len() >= self.max_sessions {
            if let Some(evicted) = visits.keys().next().cloned() {
                visits.remove(&evicted);
            }
        }

        let count = visits.entry(session_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Current visit count for a session, 0 if unseen
    pub async fn visits(&self, session_id: &str) -> u64 {
        self.visits.read().await.get(session_id).copied().unwrap_or(0)
    }

    /// Number of sessions currently tracked
    pub async fn tracked(&self) -> usize {
        self.visits.read().await.len()
    }
}

impl Default for SessionsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counter_starts_at_zero_and_increments() {
        let sessions = SessionsService::new();
        let sid = sessions.new_session_id();

        assert_eq!(sessions.visits(&sid).await, 0);
        assert_eq!(sessions.increment_visits(&sid).await, 1);
        assert_eq!(sessions.increment_visits(&sid).await, 2);
        assert_eq!(sessions.visits(&sid).await, 2);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let sessions = SessionsService::new();
        let a = sessions.new_session_id();
        let b = sessions.new_session_id();

        sessions.increment_visits(&a).await;
        sessions.increment_visits(&a).await;
        assert_eq!(sessions.increment_visits(&b).await, 1);
        assert_eq!(sessions.visits(&a).await, 2);
    }

    #[tokio::test]
    async fn test_tracked_sessions_never_exceed_capacity() {
        let sessions = SessionsService::with_capacity(3);

        for _ in 0..10 {
            let sid = sessions.new_session_id();
            assert_eq!(sessions.increment_visits(&sid).await, 1);
        }

        assert_eq!(sessions.tracked().await, 3);
    }

    #[tokio::test]
    async fn test_known_session_still_counts_at_capacity() {
        let sessions = SessionsService::with_capacity(2);
        let kept = sessions.new_session_id();
        sessions.increment_visits(&kept).await;

        // Fill the map past capacity with other sessions
        for _ in 0..5 {
            let sid = sessions.new_session_id();
            sessions.increment_visits(&sid).await;
        }

        // A session that survived eviction keeps its history;
        // one that did not simply restarts from 1.
        let next = sessions.increment_visits(&kept).await;
        assert!(next == 1 || next == 2);
        assert!(sessions.tracked().await <= 2);
    }
}
