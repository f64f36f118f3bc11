//! NavigateHandler - Visitor-driven moves between stages.

use std::sync::Arc;

use serde::Deserialize;

use super::{load_session, SessionState};
use crate::application::ApplicationError;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Navigation the visitor can request without supplying data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationAction {
    /// Summary → lead form.
    FullReport,
    /// Lead form → summary.
    Back,
    /// Anywhere → URL input, wiping the session.
    Reset,
    /// Clear the error banner.
    DismissError,
}

#[derive(Debug, Clone)]
pub struct NavigateCommand {
    pub session_id: SessionId,
    pub action: NavigationAction,
}

/// Handler for navigation commands.
pub struct NavigateHandler {
    store: Arc<dyn SessionStore>,
    backend_configured: bool,
}

impl NavigateHandler {
    pub fn new(store: Arc<dyn SessionStore>, backend_configured: bool) -> Self {
        Self {
            store,
            backend_configured,
        }
    }

    pub async fn handle(&self, cmd: NavigateCommand) -> Result<SessionState, ApplicationError> {
        let handle = load_session(self.store.as_ref(), cmd.session_id).await?;
        let mut session = handle.lock().await;

        match cmd.action {
            NavigationAction::FullReport => session.request_full_report()?,
            NavigationAction::Back => session.go_back()?,
            NavigationAction::Reset => session.reset(),
            NavigationAction::DismissError => session.dismiss_error(),
        }
        tracing::debug!(
            session_id = %cmd.session_id,
            action = ?cmd.action,
            stage = %session.stage(),
            "Session navigated"
        );

        Ok(SessionState::of(&session, self.backend_configured))
    }
}
