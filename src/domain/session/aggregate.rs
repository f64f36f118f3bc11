//! Analysis session aggregate.
//!
//! One session tracks one visitor from URL entry to the detailed report.
//! All transitions go through methods on [`AnalysisSession`]; callers only
//! ever see [`SessionSnapshot`]s and [`View`]s.
//!
//! # Concurrency
//!
//! At most one analysis request is in flight per session. Starting one hands
//! out an [`AnalysisTicket`] stamped with the session's generation; the
//! outcome is only applied if the generation still matches, so a response
//! that arrives after `reset()` is dropped.

use serde::Serialize;

use super::{SessionError, Stage, View};
use crate::domain::analysis::{AnalysisError, AnalysisResult, TargetUrl, NOT_CONFIGURED_MESSAGE};
use crate::domain::foundation::{SessionId, StateMachine, Timestamp};
use crate::domain::lead::{FormData, LeadData};

/// Proof that an analysis request was started for a given session generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    session_id: SessionId,
    generation: u64,
    url: TargetUrl,
}

impl AnalysisTicket {
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn url(&self) -> &TargetUrl {
        &self.url
    }
}

/// Outcome of `submit_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Request accepted; the caller must run the analysis for this ticket.
    Started(AnalysisTicket),
    /// No backend credential; the session recorded the error and stayed put.
    NotConfigured,
}

/// Outcome of `complete_analysis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The outcome was applied and the session moved to this stage.
    Applied(Stage),
    /// The ticket was stale; the session is unchanged.
    Discarded,
}

/// Read-only copy of the visitor-visible session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub stage: Stage,
    pub url: String,
    pub analysis_result: Option<AnalysisResult>,
    pub lead_data: Option<LeadData>,
    pub error: Option<String>,
    pub is_loading: bool,
}

/// Analysis session aggregate.
///
/// # Invariants
///
/// - `is_loading` is true exactly while an accepted request is unresolved
/// - `SummaryResults`, `LeadCapture` and `DetailedReport` are only entered
///   with an `analysis_result`
/// - `DetailedReport` is only entered with `lead_data`
/// - A rejected operation leaves every field unchanged
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    id: SessionId,
    stage: Stage,
    url: String,
    analysis_result: Option<AnalysisResult>,
    lead_data: Option<LeadData>,
    error: Option<String>,
    is_loading: bool,
    generation: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AnalysisSession {
    /// Create a fresh session in `InputUrl`.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            stage: Stage::InputUrl,
            url: String::new(),
            analysis_result: None,
            lead_data: None,
            error: None,
            is_loading: false,
            generation: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn analysis_result(&self) -> Option<&AnalysisResult> {
        self.analysis_result.as_ref()
    }

    pub fn lead_data(&self) -> Option<&LeadData> {
        self.lead_data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            stage: self.stage,
            url: self.url.clone(),
            analysis_result: self.analysis_result.clone(),
            lead_data: self.lead_data.clone(),
            error: self.error.clone(),
            is_loading: self.is_loading,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit a URL for analysis.
    ///
    /// # Errors
    ///
    /// - `AnalysisInFlight` if a request is already running
    /// - `InvalidTransition` outside `InputUrl`
    pub fn submit_url(
        &mut self,
        url: TargetUrl,
        backend_configured: bool,
    ) -> Result<SubmitOutcome, SessionError> {
        if self.is_loading {
            return Err(SessionError::AnalysisInFlight);
        }
        self.require_stage(Stage::InputUrl, "submit a URL")?;

        if !backend_configured {
            self.error = Some(NOT_CONFIGURED_MESSAGE.to_string());
            self.touch();
            return Ok(SubmitOutcome::NotConfigured);
        }

        self.url = url.as_str().to_string();
        self.analysis_result = None;
        self.error = None;
        self.is_loading = true;
        self.generation += 1;
        self.move_to(Stage::Analyzing);

        Ok(SubmitOutcome::Started(AnalysisTicket {
            session_id: self.id,
            generation: self.generation,
            url,
        }))
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Outcomes for tickets from an earlier generation, or arriving when no
    /// request is pending, are discarded.
    pub fn complete_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> CompletionOutcome {
        if !self.is_current(ticket) {
            return CompletionOutcome::Discarded;
        }

        self.is_loading = false;
        match outcome {
            Ok(result) => {
                self.analysis_result = Some(result);
                self.move_to(Stage::SummaryResults);
            }
            Err(err) => {
                self.error = Some(err.user_message());
                self.move_to(Stage::InputUrl);
            }
        }
        CompletionOutcome::Applied(self.stage)
    }

    /// Ask for the full report, which leads to the contact form.
    pub fn request_full_report(&mut self) -> Result<(), SessionError> {
        self.require_stage(Stage::SummaryResults, "request the full report")?;
        if self.analysis_result.is_none() {
            return Err(SessionError::not_ready("analysis result"));
        }
        self.move_to(Stage::LeadCapture);
        Ok(())
    }

    /// Submit the lead form.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` outside `LeadCapture`
    /// - `NotReady` if no analysis result is present
    /// - `InvalidLead` with per-field messages; the stage does not change
    pub fn submit_lead(&mut self, form: &FormData) -> Result<&LeadData, SessionError> {
        self.require_stage(Stage::LeadCapture, "submit the lead form")?;
        if self.analysis_result.is_none() {
            return Err(SessionError::not_ready("analysis result"));
        }

        let lead = LeadData::capture(form, self.url.clone(), Timestamp::now())
            .map_err(SessionError::InvalidLead)?;
        self.move_to(Stage::DetailedReport);
        Ok(self.lead_data.insert(lead))
    }

    /// Leave the contact form and return to the summary.
    pub fn go_back(&mut self) -> Result<(), SessionError> {
        self.require_stage(Stage::LeadCapture, "go back")?;
        self.move_to(Stage::SummaryResults);
        Ok(())
    }

    /// Return to URL input, wiping everything the visitor produced.
    ///
    /// Invalidates any in-flight request. Calling it twice is the same as
    /// calling it once.
    pub fn reset(&mut self) {
        if self.is_loading {
            self.generation += 1;
        }
        self.url.clear();
        self.analysis_result = None;
        self.lead_data = None;
        self.error = None;
        self.is_loading = false;
        self.move_to(Stage::InputUrl);
    }

    /// Clear the error banner without changing stage.
    pub fn dismiss_error(&mut self) {
        if self.error.take().is_some() {
            self.touch();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Result and lead for export, available together or not at all.
    pub fn report_data(&self) -> Result<(&AnalysisResult, &LeadData), SessionError> {
        match (&self.analysis_result, &self.lead_data) {
            (Some(result), Some(lead)) => Ok((result, lead)),
            _ => Err(SessionError::ReportDataNotFound),
        }
    }

    /// Derive what the visitor should see.
    ///
    /// Precedence: loading, then missing credential, then error banner, then
    /// the stage's own view.
    pub fn view(&self, backend_configured: bool) -> View {
        if self.is_loading {
            return View::Loading {
                url: self.url.clone(),
            };
        }
        if !backend_configured {
            return View::not_configured();
        }
        if let Some(message) = &self.error {
            return View::Error {
                message: message.clone(),
            };
        }

        match self.stage {
            Stage::InputUrl => View::UrlInput {
                is_loading: self.is_loading,
            },
            Stage::Analyzing => View::Loading {
                url: self.url.clone(),
            },
            Stage::SummaryResults => match &self.analysis_result {
                Some(result) => View::Summary {
                    result: result.teaser(),
                },
                None => View::preparing_results(),
            },
            Stage::LeadCapture => View::LeadForm,
            Stage::DetailedReport => match (&self.analysis_result, &self.lead_data) {
                (Some(result), Some(lead)) => View::Report {
                    result: result.clone(),
                    lead: lead.clone(),
                },
                _ => View::generating_report(),
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn is_current(&self, ticket: &AnalysisTicket) -> bool {
        ticket.session_id == self.id
            && ticket.generation == self.generation
            && self.is_loading
            && self.stage == Stage::Analyzing
    }

    fn require_stage(&self, expected: Stage, action: &'static str) -> Result<(), SessionError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(SessionError::invalid_transition(self.stage, action))
        }
    }

    fn move_to(&mut self, target: Stage) {
        debug_assert!(
            self.stage.can_transition_to(&target),
            "{} -> {}",
            self.stage,
            target
        );
        self.stage = target;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
