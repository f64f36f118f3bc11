//! Result validator - turns raw backend text into an [`AnalysisResult`].
//!
//! The generator is told to return a bare JSON object but regularly wraps it
//! in a markdown fence anyway, so fence stripping is tolerant of both shapes.
//! After JSON parsing the payload is checked field by field: the backend is
//! untrusted-shaped input and a missing or out-of-range field is a failure,
//! not something to paper over. Payload and field sizes are bounded before
//! anything is copied into a result.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use super::result::{AnalysisResult, Findings, Scores};
use crate::domain::foundation::Score;

/// Number of characters of the original payload kept for diagnostics.
pub const DIAGNOSTIC_PREFIX_CHARS: usize = 80;

/// Maximum payload size accepted from the backend, in bytes.
pub const MAX_RESPONSE_LENGTH: usize = 100_000;

/// Maximum size of a single finding or the summary, in bytes.
pub const MAX_FIELD_LENGTH: usize = 10_000;

static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```(?i:json)?\s*\n?(.*?)\n?\s*```\s*$").expect("fence pattern is valid")
});

/// Why a payload could not be turned into an analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("analysis payload is empty")]
    Empty,

    #[error("analysis payload too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("analysis payload is not valid JSON ({reason}): {prefix}")]
    InvalidJson { reason: String, prefix: String },

    #[error("analysis payload is not a JSON object: {prefix}")]
    NotAnObject { prefix: String },

    #[error("analysis payload is missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("analysis payload field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Strips a surrounding markdown code fence, if any.
///
/// Returns the trimmed input unchanged when no fence is present.
pub fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) if !inner.as_str().trim().is_empty() => inner.as_str().trim(),
        _ => trimmed,
    }
}

/// Parses raw backend text into a validated [`AnalysisResult`].
pub fn parse(raw: &str) -> Result<AnalysisResult, ParseError> {
    if raw.len() > MAX_RESPONSE_LENGTH {
        return Err(ParseError::TooLong {
            max: MAX_RESPONSE_LENGTH,
            actual: raw.len(),
        });
    }

    let body = strip_fence(raw);
    if body.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| ParseError::InvalidJson {
        reason: e.to_string(),
        prefix: diagnostic_prefix(raw),
    })?;

    let object = match value {
        Value::Object(map) => map,
        _ => {
            return Err(ParseError::NotAnObject {
                prefix: diagnostic_prefix(raw),
            })
        }
    };

    let scores = Scores {
        overall: require_score(&object, "overallScore")?,
        navigation_clarity: require_score(&object, "navigationClarityScore")?,
        accessibility: require_score(&object, "accessibilityScore")?,
    };
    let findings = Findings {
        ux_issues: require_findings(&object, "uxIssues")?,
        ux_positives: require_findings(&object, "uxPositives")?,
        a11y_issues: require_findings(&object, "a11yIssues")?,
        a11y_positives: require_findings(&object, "a11yPositives")?,
    };
    let summary = require_text(&object, "reportSummary")?;

    Ok(AnalysisResult::new(scores, findings, summary))
}

fn diagnostic_prefix(raw: &str) -> String {
    raw.trim().chars().take(DIAGNOSTIC_PREFIX_CHARS).collect()
}

fn require<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, ParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ParseError::MissingField { field }),
        Some(value) => Ok(value),
    }
}

fn require_score(object: &Map<String, Value>, field: &'static str) -> Result<Score, ParseError> {
    let value = require(object, field)?;
    let number = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        .ok_or_else(|| ParseError::InvalidField {
            field,
            reason: format!("expected an integer, got {}", value),
        })?;

    Score::try_new(field, number).map_err(|e| ParseError::InvalidField {
        field,
        reason: e.to_string(),
    })
}

fn require_findings(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, ParseError> {
    let items = require(object, field)?
        .as_array()
        .ok_or_else(|| ParseError::InvalidField {
            field,
            reason: "expected an array of strings".to_string(),
        })?;

    if items.is_empty() {
        return Err(ParseError::InvalidField {
            field,
            reason: "expected at least one entry".to_string(),
        });
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.as_str().map(str::trim) {
            Some(text) if !text.is_empty() => bounded(field, text),
            _ => Err(ParseError::InvalidField {
                field,
                reason: format!("entry {} is not a non-blank string", index),
            }),
        })
        .collect()
}

fn require_text(object: &Map<String, Value>, field: &'static str) -> Result<String, ParseError> {
    match require(object, field)?.as_str().map(str::trim) {
        Some(text) if !text.is_empty() => bounded(field, text),
        _ => Err(ParseError::InvalidField {
            field,
            reason: "expected a non-blank string".to_string(),
        }),
    }
}

fn bounded(field: &'static str, text: &str) -> Result<String, ParseError> {
    if text.len() > MAX_FIELD_LENGTH {
        return Err(ParseError::InvalidField {
            field,
            reason: format!(
                "{} bytes exceeds maximum of {} bytes",
                text.len(),
                MAX_FIELD_LENGTH
            ),
        });
    }
    Ok(text.to_string())
}
