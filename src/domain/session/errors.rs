//! Session-specific error types.

use thiserror::Error;

use super::Stage;
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::lead::LeadFormErrors;

/// Message shown when an export is attempted without a completed report.
pub const REPORT_DATA_NOT_FOUND_MESSAGE: &str =
    "Report data not found. Please complete the analysis and contact form first.";

/// Session-specific errors.
///
/// None of these are fatal: a rejected request leaves the session exactly as
/// it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Session was not found.
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    /// The requested action is not allowed from the current stage.
    #[error("Cannot {action} while in stage {stage}")]
    InvalidTransition { stage: Stage, action: &'static str },

    /// An analysis request is already running for this session.
    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    /// Data required by the current stage is unexpectedly absent.
    #[error("Session is not ready: {0}")]
    NotReady(&'static str),

    /// Export attempted before both result and lead exist.
    #[error("{}", REPORT_DATA_NOT_FOUND_MESSAGE)]
    ReportDataNotFound,

    /// Lead form failed field validation.
    #[error("Lead form is invalid: {0}")]
    InvalidLead(LeadFormErrors),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn invalid_transition(stage: Stage, action: &'static str) -> Self {
        SessionError::InvalidTransition { stage, action }
    }

    pub fn not_ready(what: &'static str) -> Self {
        SessionError::NotReady(what)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            SessionError::AnalysisInFlight => ErrorCode::AnalysisInFlight,
            SessionError::NotReady(_) => ErrorCode::NotReady,
            SessionError::ReportDataNotFound => ErrorCode::ReportDataNotFound,
            SessionError::InvalidLead(_) => ErrorCode::InvalidLead,
        }
    }
}
