//! Document adapters - Report rendering and export.
//!
//! - `PulldownReportExporter` - Markdown, HTML (pulldown-cmark) and PDF (Pandoc)

mod pulldown_report_exporter;
mod report_markdown;

pub use pulldown_report_exporter::PulldownReportExporter;
pub use report_markdown::{render_report, REPORT_TITLE};
