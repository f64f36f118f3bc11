//! AnalyzeUrlHandler - Submits a URL and runs the analysis to completion.
//!
//! The session lock is held to start the request and again to apply its
//! outcome, never while the backend is working. The request itself runs on
//! its own task so a dropped caller cannot strand the session in `Analyzing`.

use std::sync::Arc;

use super::{load_session, SessionState};
use crate::application::{AnalysisGateway, ApplicationError};
use crate::domain::analysis::TargetUrl;
use crate::domain::foundation::SessionId;
use crate::domain::session::{CompletionOutcome, SubmitOutcome};
use crate::ports::SessionStore;

/// Command to analyze a website for a session.
#[derive(Debug, Clone)]
pub struct AnalyzeUrlCommand {
    pub session_id: SessionId,
    /// URL as typed by the visitor.
    pub url: String,
}

/// Handler for URL submission.
pub struct AnalyzeUrlHandler {
    store: Arc<dyn SessionStore>,
    gateway: Arc<AnalysisGateway>,
}

impl AnalyzeUrlHandler {
    pub fn new(store: Arc<dyn SessionStore>, gateway: Arc<AnalysisGateway>) -> Self {
        Self { store, gateway }
    }

    /// Validate the URL, start the analysis and wait for its outcome.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if the input is empty or not an absolute URL
    /// - `SessionNotFound`
    /// - `AnalysisInFlight` / `InvalidStateTransition` from the session
    pub async fn handle(&self, cmd: AnalyzeUrlCommand) -> Result<SessionState, ApplicationError> {
        let url = TargetUrl::parse(&cmd.url)?;
        let handle = load_session(self.store.as_ref(), cmd.session_id).await?;
        let configured = self.gateway.is_configured();

        let ticket = {
            let mut session = handle.lock().await;
            match session.submit_url(url, configured)? {
                SubmitOutcome::Started(ticket) => ticket,
                SubmitOutcome::NotConfigured => {
                    tracing::warn!(
                        session_id = %cmd.session_id,
                        "Analysis requested without a configured backend"
                    );
                    return Ok(SessionState::of(&session, configured));
                }
            }
        };

        tracing::info!(
            session_id = %cmd.session_id,
            host = %ticket.url().host(),
            generation = ticket.generation(),
            "Analysis started"
        );

        let gateway = Arc::clone(&self.gateway);
        let task = tokio::spawn(async move {
            let outcome = gateway
                .request_analysis(ticket.url(), ticket.session_id())
                .await;

            let mut session = handle.lock().await;
            match session.complete_analysis(&ticket, outcome) {
                CompletionOutcome::Applied(stage) => {
                    tracing::debug!(session_id = %ticket.session_id(), %stage, "Analysis completed");
                }
                CompletionOutcome::Discarded => {
                    tracing::warn!(
                        session_id = %ticket.session_id(),
                        generation = ticket.generation(),
                        "Discarded stale analysis response"
                    );
                }
            }
            SessionState::of(&session, configured)
        });

        task.await
            .map_err(|e| ApplicationError::internal(format!("analysis task failed: {}", e)))
    }
}
