//! TargetUrl value object - the website a visitor asks to have analyzed.

use reqwest::Url;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Message shown when the visitor submits an empty URL field.
pub const EMPTY_URL_MESSAGE: &str = "Please enter a website URL.";

/// Message shown when the visitor submits something that is not an absolute URL.
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL (e.g., https://example.com).";

/// Reasons a submitted URL is rejected before any analysis starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetUrlError {
    #[error("{}", EMPTY_URL_MESSAGE)]
    Empty,

    #[error("{}", INVALID_URL_MESSAGE)]
    Invalid { input: String },
}

/// A syntactically valid absolute URL (scheme + host).
///
/// The visitor's text is kept as typed (minus surrounding whitespace) so the
/// analyzed URL recorded on the lead matches what was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    raw: String,
    host: String,
}

impl TargetUrl {
    /// Parses and validates visitor input.
    pub fn parse(input: &str) -> Result<Self, TargetUrlError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TargetUrlError::Empty);
        }

        let invalid = || TargetUrlError::Invalid {
            input: trimmed.to_string(),
        };
        let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(invalid)?
            .to_string();

        Ok(Self {
            raw: trimmed.to_string(),
            host,
        })
    }

    /// The URL as submitted.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Host component, used for log fields.
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for TargetUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
