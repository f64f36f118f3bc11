//! GetSessionHandler - Query handler for the current session state.

use std::sync::Arc;

use super::{load_session, SessionState};
use crate::application::ApplicationError;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving session state.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
    backend_configured: bool,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, backend_configured: bool) -> Self {
        Self {
            store,
            backend_configured,
        }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionState, ApplicationError> {
        let handle = load_session(self.store.as_ref(), query.session_id).await?;
        let session = handle.lock().await;
        Ok(SessionState::of(&session, self.backend_configured))
    }
}
