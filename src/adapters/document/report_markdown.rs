//! Markdown layout of the NavSense full report.
//!
//! The same markdown feeds every export format: it is served as-is, rendered
//! to HTML with pulldown-cmark, or piped through Pandoc for PDF.

use crate::domain::analysis::AnalysisResult;
use crate::domain::foundation::Score;
use crate::domain::lead::LeadData;

pub const REPORT_TITLE: &str = "Your NavSense AI™ Full Report";

const CONSULTATION_HEADING: &str = "Ready to Elevate Your Website?";
const CONSULTATION_TEXT: &str = "This report provides a snapshot. A personalized consultation can help you craft a strategy for a truly exceptional user experience and full AODA compliance.";
const CONSULTATION_URL: &str = "https://example.com/book-consultation";
const SIMULATED_NOTE: &str = "Note: This is a simulated report. Actual PDF generation and deeper analysis are part of our premium services.";

/// Render the full report for `lead` as markdown.
pub fn render_report(result: &AnalysisResult, lead: &LeadData) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", REPORT_TITLE));
    md.push_str(&format!(
        "**Prepared for:** {}, {}  \n",
        escape(lead.name()),
        escape(lead.association())
    ));
    md.push_str(&format!("**Website Analyzed:** {}  \n", escape(lead.analyzed_url())));
    md.push_str(&format!(
        "**Generated:** {}\n\n",
        lead.timestamp().as_datetime().format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("| Measure | Score | Rating |\n|---|---|---|\n");
    md.push_str(&score_row("Overall Score", result.overall_score()));
    md.push_str(&score_row("Navigation Clarity", result.navigation_clarity_score()));
    md.push_str(&score_row("Accessibility", result.accessibility_score()));

    md.push_str(&format!(
        "\n## Executive Summary\n\n{}\n\n",
        escape(result.report_summary())
    ));

    md.push_str("## Navigation Clarity Details\n\n");
    md.push_str(&findings("Key Strengths", result.ux_positives()));
    md.push_str(&findings("Opportunities for Improvement", result.ux_issues()));

    md.push_str("## Accessibility Compliance Details\n\n");
    md.push_str(&findings("Key Strengths", result.a11y_positives()));
    md.push_str(&findings("Opportunities for Improvement", result.a11y_issues()));

    md.push_str("---\n\n");
    md.push_str(&format!("## {}\n\n{}\n\n", CONSULTATION_HEADING, CONSULTATION_TEXT));
    md.push_str(&format!("[Book a Free Consultation]({})\n\n", CONSULTATION_URL));
    md.push_str(&format!("*{}*\n", SIMULATED_NOTE));

    md
}

fn score_row(label: &str, score: Score) -> String {
    format!("| {} | {} / 100 | {} |\n", label, score, score.band())
}

fn findings(heading: &str, items: &[String]) -> String {
    let mut section = format!("### {}\n\n", heading);
    for item in items {
        section.push_str(&format!("- {}\n", escape(item)));
    }
    section.push('\n');
    section
}

/// Backslash-escape characters that would change markdown structure, and
/// flatten line breaks so one value stays one line.
///
/// Covers Pandoc's extensions too: `$` (TeX math), `^` and `~` (super and
/// subscript, strikeout).
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '$' | '^' | '~' => {
                out.push('\\');
                out.push(c);
            }
            '\r' | '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
