//! Session Store Port - Where live analysis sessions are kept.
//!
//! Sessions are handed out as shared handles behind an async mutex so every
//! transition on one session is serialized while different sessions proceed
//! independently.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::session::AnalysisSession;

/// Shared, lockable handle to one session.
pub type SessionHandle = Arc<Mutex<AnalysisSession>>;

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),

    #[error("Session limit of {limit} reached")]
    CapacityExceeded { limit: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for keeping sessions between requests.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session and return its handle.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if a session with the same id is stored, or
    /// `CapacityExceeded` if the store is full.
    async fn insert(&self, session: AnalysisSession) -> Result<SessionHandle, SessionStoreError>;

    /// Find a session by id.
    async fn find(&self, id: &SessionId) -> Result<Option<SessionHandle>, SessionStoreError>;

    /// Remove a session, returning whether it existed.
    async fn remove(&self, id: &SessionId) -> Result<bool, SessionStoreError>;

    /// Number of stored sessions.
    async fn count(&self) -> Result<usize, SessionStoreError>;

    /// Drop sessions untouched for at least `max_idle`.
    ///
    /// Sessions that are locked or waiting on an analysis are kept.
    /// Returns the ids that were removed.
    async fn evict_idle(&self, max_idle: Duration) -> Result<Vec<SessionId>, SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn check<T: SessionStore + ?Sized>() {}
        check::<dyn SessionStore>();
    }
}
