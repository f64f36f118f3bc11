//! Session command and query handlers.
//!
//! Every handler locks the target session only while applying a transition
//! and answers with a [`SessionState`]: the snapshot plus the view the
//! visitor should see.

mod analyze_url;
mod create_session;
mod export_report;
mod get_session;
mod navigate;
mod submit_lead;

pub use analyze_url::{AnalyzeUrlCommand, AnalyzeUrlHandler};
pub use create_session::CreateSessionHandler;
pub use export_report::{ExportReportCommand, ExportReportHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use navigate::{NavigateCommand, NavigateHandler, NavigationAction};
pub use submit_lead::{SubmitLeadCommand, SubmitLeadHandler};

use crate::application::ApplicationError;
use crate::domain::foundation::SessionId;
use crate::domain::session::{AnalysisSession, SessionError, SessionSnapshot, View};
use crate::ports::{SessionHandle, SessionStore};

/// Session state as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub snapshot: SessionSnapshot,
    pub view: View,
    pub backend_configured: bool,
}

impl SessionState {
    pub fn of(session: &AnalysisSession, backend_configured: bool) -> Self {
        Self {
            snapshot: session.snapshot(),
            view: session.view(backend_configured),
            backend_configured,
        }
    }
}

async fn load_session(
    store: &dyn SessionStore,
    id: SessionId,
) -> Result<SessionHandle, ApplicationError> {
    store
        .find(&id)
        .await?
        .ok_or_else(|| SessionError::not_found(id).into())
}
