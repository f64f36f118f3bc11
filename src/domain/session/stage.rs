//! Stage enum for the visitor's journey through an analysis session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Phase of an analysis session.
///
/// `InputUrl` is the initial stage and is re-enterable from every stage via
/// reset, so no stage is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    InputUrl,
    Analyzing,
    SummaryResults,
    LeadCapture,
    DetailedReport,
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (_, InputUrl)
                | (InputUrl, Analyzing)
                | (Analyzing, SummaryResults)
                | (SummaryResults, LeadCapture)
                | (LeadCapture, DetailedReport)
                | (LeadCapture, SummaryResults)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        match self {
            InputUrl => vec![Analyzing, InputUrl],
            Analyzing => vec![SummaryResults, InputUrl],
            SummaryResults => vec![LeadCapture, InputUrl],
            LeadCapture => vec![DetailedReport, SummaryResults, InputUrl],
            DetailedReport => vec![InputUrl],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::InputUrl => "INPUT_URL",
            Stage::Analyzing => "ANALYZING",
            Stage::SummaryResults => "SUMMARY_RESULTS",
            Stage::LeadCapture => "LEAD_CAPTURE",
            Stage::DetailedReport => "DETAILED_REPORT",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Stage; 5] = [
        Stage::InputUrl,
        Stage::Analyzing,
        Stage::SummaryResults,
        Stage::LeadCapture,
        Stage::DetailedReport,
    ];

    #[test]
    fn default_is_input_url() {
        assert_eq!(Stage::default(), Stage::InputUrl);
    }

    #[test]
    fn every_stage_can_reset() {
        for stage in ALL {
            assert!(stage.can_transition_to(&Stage::InputUrl), "{:?}", stage);
            assert!(!stage.is_terminal());
        }
    }

    #[test]
    fn forward_path_is_valid() {
        assert!(Stage::InputUrl.transition_to(Stage::Analyzing).is_ok());
        assert!(Stage::Analyzing.transition_to(Stage::SummaryResults).is_ok());
        assert!(Stage::SummaryResults.transition_to(Stage::LeadCapture).is_ok());
        assert!(Stage::LeadCapture.transition_to(Stage::DetailedReport).is_ok());
    }

    #[test]
    fn shortcuts_are_rejected() {
        assert!(Stage::InputUrl.transition_to(Stage::DetailedReport).is_err());
        assert!(Stage::SummaryResults.transition_to(Stage::DetailedReport).is_err());
        assert!(Stage::DetailedReport.transition_to(Stage::LeadCapture).is_err());
        assert!(Stage::SummaryResults.transition_to(Stage::Analyzing).is_err());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for stage in ALL {
            for target in ALL {
                assert_eq!(
                    stage.can_transition_to(&target),
                    stage.valid_transitions().contains(&target),
                    "{:?} -> {:?}",
                    stage,
                    target
                );
            }
        }
    }

    #[test]
    fn serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Stage::SummaryResults).unwrap(),
            "\"SUMMARY_RESULTS\""
        );
        assert_eq!(Stage::LeadCapture.to_string(), "LEAD_CAPTURE");
    }
}
