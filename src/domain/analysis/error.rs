//! Failure taxonomy of a single analysis request.

use thiserror::Error;

use super::ParseError;

/// Message recorded when an analysis is requested without a backend credential.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "API Key not configured. Please ensure the API_KEY environment variable is set.";

/// Why an analysis produced no result.
///
/// Every variant is recoverable: the session returns to URL input with a
/// visitor-facing message and nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No credential for the generation backend; no request was made.
    #[error("analysis backend is not configured")]
    NotConfigured,

    /// The backend could not be reached or answered with an error.
    #[error("{0}")]
    BackendFailure(String),

    /// The backend answered, but not with a usable analysis payload.
    #[error("{0}")]
    MalformedPayload(String),
}

impl AnalysisError {
    pub fn backend_failure(message: impl Into<String>) -> Self {
        Self::BackendFailure(message.into())
    }

    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }

    /// The single message shown to the visitor for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            AnalysisError::BackendFailure(msg) | AnalysisError::MalformedPayload(msg) => {
                if msg.trim().is_empty() {
                    "Failed to analyze website. Please try again.".to_string()
                } else {
                    format!("Failed to analyze website. {}", msg)
                }
            }
        }
    }
}

impl From<ParseError> for AnalysisError {
    fn from(err: ParseError) -> Self {
        AnalysisError::MalformedPayload(err.to_string())
    }
}
