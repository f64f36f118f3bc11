//! View - what the visitor should see for a given session state.

use serde::Serialize;

use crate::domain::analysis::AnalysisResult;
use crate::domain::lead::LeadData;

/// Message shown on every stage while no backend credential is configured.
pub const NOT_CONFIGURED_VIEW_MESSAGE: &str =
    "API Key not configured. Please set the API_KEY environment variable to use NavSense AI™.";

pub const PREPARING_RESULTS_TEXT: &str = "Preparing results...";
pub const GENERATING_REPORT_TEXT: &str = "Generating report...";

/// Rendered view of a session.
///
/// Views are derived, never stored: the same session state always renders
/// the same view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// URL entry form.
    UrlInput { is_loading: bool },

    /// Analysis in progress for `url`.
    Loading { url: String },

    /// Placeholder while data the stage expects is absent.
    Preparing { text: &'static str },

    /// Teaser of the result (each list cut to its first three entries).
    Summary { result: AnalysisResult },

    /// Contact form unlocking the full report.
    LeadForm,

    /// Full report for a captured lead.
    Report {
        result: AnalysisResult,
        lead: LeadData,
    },

    /// Error banner.
    Error { message: String },
}

impl View {
    pub fn preparing_results() -> Self {
        View::Preparing {
            text: PREPARING_RESULTS_TEXT,
        }
    }

    pub fn generating_report() -> Self {
        View::Preparing {
            text: GENERATING_REPORT_TEXT,
        }
    }

    pub fn not_configured() -> Self {
        View::Error {
            message: NOT_CONFIGURED_VIEW_MESSAGE.to_string(),
        }
    }
}
