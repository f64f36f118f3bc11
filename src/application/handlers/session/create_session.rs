//! CreateSessionHandler - Starts a new visitor session.

use std::sync::Arc;

use super::SessionState;
use crate::application::ApplicationError;
use crate::domain::foundation::SessionId;
use crate::domain::session::AnalysisSession;
use crate::ports::SessionStore;

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
    backend_configured: bool,
}

impl CreateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, backend_configured: bool) -> Self {
        Self {
            store,
            backend_configured,
        }
    }

    pub async fn handle(&self) -> Result<SessionState, ApplicationError> {
        let session = AnalysisSession::new(SessionId::new());
        let state = SessionState::of(&session, self.backend_configured);

        self.store.insert(session).await?;
        tracing::debug!(session_id = %state.snapshot.id, "Session created");

        Ok(state)
    }
}
