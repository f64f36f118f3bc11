//! SubmitLeadHandler - Captures the visitor's contact details.

use std::sync::Arc;

use super::{load_session, SessionState};
use crate::application::ApplicationError;
use crate::domain::foundation::SessionId;
use crate::domain::lead::FormData;
use crate::ports::{LeadRecorder, SessionStore};

#[derive(Debug, Clone)]
pub struct SubmitLeadCommand {
    pub session_id: SessionId,
    pub form: FormData,
}

/// Handler for lead form submissions.
pub struct SubmitLeadHandler {
    store: Arc<dyn SessionStore>,
    recorder: Arc<dyn LeadRecorder>,
    backend_configured: bool,
}

impl SubmitLeadHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        recorder: Arc<dyn LeadRecorder>,
        backend_configured: bool,
    ) -> Self {
        Self {
            store,
            recorder,
            backend_configured,
        }
    }

    /// Validate the form and unlock the detailed report.
    ///
    /// A recording failure is logged; the visitor still gets the report.
    pub async fn handle(&self, cmd: SubmitLeadCommand) -> Result<SessionState, ApplicationError> {
        let handle = load_session(self.store.as_ref(), cmd.session_id).await?;

        let (lead, state) = {
            let mut session = handle.lock().await;
            let lead = session.submit_lead(&cmd.form)?.clone();
            (lead, SessionState::of(&session, self.backend_configured))
        };

        if let Err(err) = self.recorder.record(&lead).await {
            tracing::warn!(session_id = %cmd.session_id, error = %err, "Failed to record lead");
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lead::InMemoryLeadRecorder;
    use crate::application::handlers::session::test_support::{analyzed_session, store};
    use crate::application::handlers::session::{
        NavigateCommand, NavigateHandler, NavigationAction,
    };
    use crate::domain::foundation::ErrorCode;
    use crate::domain::session::{Stage, View};

    async fn at_lead_capture(store: Arc<crate::adapters::storage::InMemorySessionStore>) -> SessionId {
        let id = analyzed_session(store.clone()).await;
        NavigateHandler::new(store, true)
            .handle(NavigateCommand {
                session_id: id,
                action: NavigationAction::FullReport,
            })
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn valid_lead_unlocks_report_and_is_recorded() {
        let store = store();
        let id = at_lead_capture(store.clone()).await;
        let recorder = Arc::new(InMemoryLeadRecorder::new());
        let handler = SubmitLeadHandler::new(store, recorder.clone(), true);

        let state = handler
            .handle(SubmitLeadCommand {
                session_id: id,
                form: FormData::new("Ada", "Library Association", "ada@example.org"),
            })
            .await
            .unwrap();

        assert_eq!(state.snapshot.stage, Stage::DetailedReport);
        assert!(matches!(state.view, View::Report { .. }));
        let leads = recorder.leads().await;
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].analyzed_url(), "https://example.org");
    }

    #[tokio::test]
    async fn invalid_lead_is_not_recorded() {
        let store = store();
        let id = at_lead_capture(store.clone()).await;
        let recorder = Arc::new(InMemoryLeadRecorder::new());
        let handler = SubmitLeadHandler::new(store, recorder.clone(), true);

        let err = handler
            .handle(SubmitLeadCommand {
                session_id: id,
                form: FormData::new("", "Assoc", "bad"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidLead);
        assert!(recorder.leads().await.is_empty());
    }
}
