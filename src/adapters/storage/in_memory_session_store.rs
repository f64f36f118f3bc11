//! In-Memory Session Store Adapter
//!
//! Keeps live analysis sessions in a map for the lifetime of the process.
//! Sessions do not survive a restart. The map is bounded: a full store first
//! drops idle sessions and then refuses new ones.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::AnalysisSession;
use crate::ports::{SessionHandle, SessionStore, SessionStoreError};

/// Default upper bound on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Default idle time after which a session may be dropped.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// In-memory storage for analysis sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_ttl: DEFAULT_IDLE_TTL,
        }
    }

    /// Cap the number of live sessions.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Idle time after which a full store may reclaim a session on insert.
    pub fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.idle_ttl = idle_ttl;
        self
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids of sessions idle for at least `max_idle` and not in use.
fn idle_ids(sessions: &HashMap<SessionId, SessionHandle>, max_idle: Duration) -> Vec<SessionId> {
    let now = Timestamp::now();
    sessions
        .iter()
        .filter_map(|(id, handle)| {
            let session = handle.try_lock().ok()?;
            if session.is_loading() {
                return None;
            }
            let idle = now
                .duration_since(session.updated_at())
                .to_std()
                .unwrap_or_default();
            (idle >= max_idle).then_some(*id)
        })
        .collect()
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: AnalysisSession) -> Result<SessionHandle, SessionStoreError> {
        let id = session.id();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(SessionStoreError::AlreadyExists(id));
        }

        if sessions.len() >= self.max_sessions {
            let evicted = idle_ids(&sessions, self.idle_ttl);
            for stale in &evicted {
                sessions.remove(stale);
            }
            tracing::debug!(evicted = evicted.len(), "Reclaimed idle sessions on insert");
            if sessions.len() >= self.max_sessions {
                tracing::warn!(limit = self.max_sessions, "Session store is full");
                return Err(SessionStoreError::CapacityExceeded {
                    limit: self.max_sessions,
                });
            }
        }

        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn find(&self, id: &SessionId) -> Result<Option<SessionHandle>, SessionStoreError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, SessionStoreError> {
        Ok(self.sessions.read().await.len())
    }

    async fn evict_idle(&self, max_idle: Duration) -> Result<Vec<SessionId>, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let evicted = idle_ids(&sessions, max_idle);
        for id in &evicted {
            sessions.remove(id);
        }
        Ok(evicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Stage;

    #[tokio::test]
    async fn insert_then_find_returns_same_session() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        store.insert(AnalysisSession::new(id)).await.unwrap();

        let handle = store.find(&id).await.unwrap().unwrap();
        assert_eq!(handle.lock().await.id(), id);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        store.insert(AnalysisSession::new(id)).await.unwrap();

        let err = store.insert(AnalysisSession::new(id)).await.unwrap_err();
        assert!(matches!(err, SessionStoreError::AlreadyExists(dup) if dup == id));
    }

    #[tokio::test]
    async fn mutations_through_handle_are_shared() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        let handle = store.insert(AnalysisSession::new(id)).await.unwrap();

        handle.lock().await.reset();

        let found = store.find(&id).await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&handle, &found));
        assert_eq!(found.lock().await.stage(), Stage::InputUrl);
    }

    #[tokio::test]
    async fn remove_forgets_session() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        store.insert(AnalysisSession::new(id)).await.unwrap();

        assert!(store.remove(&id).await.unwrap());
        assert!(!store.remove(&id).await.unwrap());
        assert!(store.find(&id).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn idle_session_is_evicted_and_recent_one_kept() {
        let store = InMemorySessionStore::new();
        let idle = SessionId::new();
        store.insert(AnalysisSession::new(idle)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        let recent = SessionId::new();
        store.insert(AnalysisSession::new(recent)).await.unwrap();

        let evicted = store.evict_idle(Duration::from_millis(60)).await.unwrap();

        assert_eq!(evicted, vec![idle]);
        assert!(store.find(&idle).await.unwrap().is_none());
        assert!(store.find(&recent).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn sessions_in_use_survive_eviction() {
        let store = InMemorySessionStore::new();
        let locked = store.insert(AnalysisSession::new(SessionId::new())).await.unwrap();
        let loading_id = SessionId::new();
        let loading = store.insert(AnalysisSession::new(loading_id)).await.unwrap();
        let url = crate::domain::analysis::TargetUrl::parse("https://example.org").unwrap();
        loading.lock().await.submit_url(url, true).unwrap();

        let _guard = locked.lock().await;
        let evicted = store.evict_idle(Duration::ZERO).await.unwrap();

        assert!(evicted.is_empty());
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn full_store_rejects_new_sessions() {
        let store = InMemorySessionStore::new().with_max_sessions(2);
        store.insert(AnalysisSession::new(SessionId::new())).await.unwrap();
        store.insert(AnalysisSession::new(SessionId::new())).await.unwrap();

        let err = store.insert(AnalysisSession::new(SessionId::new())).await.unwrap_err();

        assert!(matches!(err, SessionStoreError::CapacityExceeded { limit: 2 }));
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn full_store_reclaims_idle_sessions_on_insert() {
        let store = InMemorySessionStore::new()
            .with_max_sessions(1)
            .with_idle_ttl(Duration::from_millis(50));
        let stale = SessionId::new();
        store.insert(AnalysisSession::new(stale)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let fresh = SessionId::new();
        store.insert(AnalysisSession::new(fresh)).await.unwrap();

        assert!(store.find(&stale).await.unwrap().is_none());
        assert!(store.find(&fresh).await.unwrap().is_some());
    }
}
