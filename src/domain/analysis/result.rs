//! AnalysisResult - the normalized outcome of one simulated site analysis.

use serde::Serialize;

use crate::domain::foundation::Score;

/// Number of findings per list the generator is asked for, and the number
/// shown in the teaser summary.
pub const FINDINGS_PER_LIST: usize = 3;

/// Normalized outcome of one analysis.
///
/// # Invariants
///
/// - All three scores are integers in [0, 100]
/// - Each findings list is non-empty and contains no blank entries
/// - `report_summary` is not blank
///
/// Instances are only produced by the result validator and are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    overall_score: Score,
    navigation_clarity_score: Score,
    accessibility_score: Score,
    ux_issues: Vec<String>,
    ux_positives: Vec<String>,
    a11y_issues: Vec<String>,
    a11y_positives: Vec<String>,
    report_summary: String,
}

/// The three headline scores of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    pub overall: Score,
    pub navigation_clarity: Score,
    pub accessibility: Score,
}

/// The four findings lists of a result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Findings {
    pub ux_issues: Vec<String>,
    pub ux_positives: Vec<String>,
    pub a11y_issues: Vec<String>,
    pub a11y_positives: Vec<String>,
}

impl AnalysisResult {
    pub(crate) fn new(scores: Scores, findings: Findings, report_summary: String) -> Self {
        Self {
            overall_score: scores.overall,
            navigation_clarity_score: scores.navigation_clarity,
            accessibility_score: scores.accessibility,
            ux_issues: findings.ux_issues,
            ux_positives: findings.ux_positives,
            a11y_issues: findings.a11y_issues,
            a11y_positives: findings.a11y_positives,
            report_summary,
        }
    }

    pub fn overall_score(&self) -> Score {
        self.overall_score
    }

    pub fn navigation_clarity_score(&self) -> Score {
        self.navigation_clarity_score
    }

    pub fn accessibility_score(&self) -> Score {
        self.accessibility_score
    }

    pub fn ux_issues(&self) -> &[String] {
        &self.ux_issues
    }

    pub fn ux_positives(&self) -> &[String] {
        &self.ux_positives
    }

    pub fn a11y_issues(&self) -> &[String] {
        &self.a11y_issues
    }

    pub fn a11y_positives(&self) -> &[String] {
        &self.a11y_positives
    }

    pub fn report_summary(&self) -> &str {
        &self.report_summary
    }

    /// Teaser copy of this result with every list cut to its first
    /// [`FINDINGS_PER_LIST`] entries.
    pub fn teaser(&self) -> Self {
        let head = |items: &[String]| items.iter().take(FINDINGS_PER_LIST).cloned().collect();
        Self {
            ux_issues: head(&self.ux_issues),
            ux_positives: head(&self.ux_positives),
            a11y_issues: head(&self.a11y_issues),
            a11y_positives: head(&self.a11y_positives),
            ..self.clone()
        }
    }
}
