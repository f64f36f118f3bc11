//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, SessionState};
use crate::domain::foundation::DomainError;
use crate::domain::lead::FormData;
use crate::domain::session::{SessionSnapshot, View};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to analyze a website.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

/// Lead form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub association: String,
    #[serde(default)]
    pub email: String,
}

impl From<LeadRequest> for FormData {
    fn from(req: LeadRequest) -> Self {
        FormData::new(req.name, req.association, req.email)
    }
}

/// Query parameters for report export.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Session state for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    pub view: View,
    pub backend_configured: bool,
}

impl From<SessionState> for SessionResponse {
    fn from(state: SessionState) -> Self {
        Self {
            snapshot: state.snapshot,
            view: state.view,
            backend_configured: state.backend_configured,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            serde_json::to_value(&err.details).ok()
        };
        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}

impl From<&ApplicationError> for ErrorResponse {
    fn from(err: &ApplicationError) -> Self {
        DomainError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::lead::{LeadFormErrors, NAME_REQUIRED};
    use crate::domain::session::{AnalysisSession, SessionError};

    #[test]
    fn lead_request_tolerates_missing_fields() {
        let req: LeadRequest = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        let form: FormData = req.into();
        assert_eq!(form.name, "Ada");
        assert!(form.email.is_empty());
    }

    #[test]
    fn session_response_flattens_snapshot() {
        let session = AnalysisSession::new(SessionId::new());
        let response: SessionResponse = SessionState::of(&session, true).into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["stage"], "INPUT_URL");
        assert_eq!(json["isLoading"], false);
        assert_eq!(json["backendConfigured"], true);
        assert_eq!(json["view"]["view"], "url_input");
    }

    #[test]
    fn lead_errors_carry_field_details() {
        let err = ApplicationError::from(SessionError::InvalidLead(LeadFormErrors {
            name: Some(NAME_REQUIRED),
            ..Default::default()
        }));
        let response = ErrorResponse::from(&err);

        assert_eq!(response.code, "INVALID_LEAD");
        assert_eq!(response.details.unwrap()["name"], NAME_REQUIRED);
    }

    #[test]
    fn error_response_bad_request_creates_correctly() {
        let error = ErrorResponse::bad_request("Invalid input");
        assert_eq!(error.code, "BAD_REQUEST");
        assert_eq!(error.message, "Invalid input");
        assert!(error.details.is_none());
    }
}
