//! Errors surfaced by application handlers.

use thiserror::Error;

use crate::domain::analysis::TargetUrlError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::SessionError;
use crate::ports::{ExportError, SessionStoreError};

/// Everything a handler can fail with.
///
/// None of these leave a session in a changed state.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    InvalidUrl(#[from] TargetUrlError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Session storage failed: {0}")]
    Storage(#[from] SessionStoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApplicationError::Session(err) => err.code(),
            ApplicationError::InvalidUrl(_) => ErrorCode::InvalidUrl,
            ApplicationError::Export(ExportError::UnsupportedFormat(_)) => {
                ErrorCode::ValidationFailed
            }
            ApplicationError::Export(_) => ErrorCode::ExportFailed,
            ApplicationError::Storage(SessionStoreError::CapacityExceeded { .. }) => {
                ErrorCode::SessionLimitReached
            }
            ApplicationError::Storage(_) | ApplicationError::Internal(_) => {
                ErrorCode::InternalError
            }
        }
    }
}

impl From<&ApplicationError> for DomainError {
    fn from(err: &ApplicationError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            ApplicationError::Session(SessionError::InvalidLead(fields)) => {
                let mut domain = DomainError::new(err.code(), "Please correct the highlighted fields.");
                for (field, message) in [
                    ("name", fields.name),
                    ("association", fields.association),
                    ("email", fields.email),
                ] {
                    if let Some(message) = message {
                        domain = domain.with_detail(field, message);
                    }
                }
                domain
            }
            ApplicationError::Session(SessionError::InvalidTransition { stage, .. }) => {
                domain.with_detail("stage", stage.to_string())
            }
            _ => domain,
        }
    }
}
