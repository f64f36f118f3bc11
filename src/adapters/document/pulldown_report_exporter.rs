//! Pulldown-cmark based report exporter.
//!
//! - Markdown is returned as rendered
//! - HTML conversion uses pulldown-cmark (pure Rust, always available)
//! - PDF conversion uses Pandoc (requires an external Pandoc installation)

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pulldown_cmark::{html, Event, Options, Parser};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::report_markdown::{render_report, REPORT_TITLE};
use crate::domain::analysis::AnalysisResult;
use crate::domain::lead::LeadData;
use crate::ports::{ExportError, ExportFormat, ExportedDocument, ReportExporter};

/// Report exporter using pulldown-cmark for HTML and Pandoc for PDF.
///
/// If Pandoc is not available, PDF export returns `ServiceUnavailable`;
/// HTML and markdown keep working.
#[derive(Debug, Clone)]
pub struct PulldownReportExporter {
    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,

    /// Timeout for PDF conversion in seconds.
    pdf_timeout_secs: u64,
}

impl Default for PulldownReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PulldownReportExporter {
    pub fn new() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: 30,
        }
    }

    /// Set a custom path to the Pandoc executable.
    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    /// Set the timeout for PDF conversion.
    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    /// Render markdown to a standalone HTML document.
    ///
    /// Raw HTML in the markdown is emitted as escaped text.
    fn to_html(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_SMART_PUNCTUATION;
        let parser = Parser::new_ext(markdown, options).map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            other => other,
        });

        let mut body = String::new();
        html::push_html(&mut body, parser);
        wrap_html(body)
    }

    async fn check_pandoc(&self) -> bool {
        Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        if !self.check_pandoc().await {
            return Err(ExportError::service_unavailable(
                "Pandoc is not installed. PDF export requires Pandoc. \
                 Install from https://pandoc.org/installing.html",
            ));
        }

        let mut child = Command::new(self.pandoc_command())
            .args([
                "-f",
                "markdown",
                "-t",
                "pdf",
                "--pdf-engine=xelatex",
                "-V",
                "geometry:margin=1in",
                "-V",
                "fontsize=11pt",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::pdf_failed(format!("Failed to start Pandoc: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(markdown.as_bytes())
                .await
                .map_err(|e| ExportError::io_error(format!("Failed to write to Pandoc: {}", e)))?;
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| ExportError::pdf_failed(format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::pdf_failed(format!(
                "Pandoc returned error: {}",
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl ReportExporter for PulldownReportExporter {
    async fn export(
        &self,
        result: &AnalysisResult,
        lead: &LeadData,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportError> {
        let markdown = render_report(result, lead);

        let content = match format {
            ExportFormat::Markdown => markdown.into_bytes(),
            ExportFormat::Html => self.to_html(&markdown).into_bytes(),
            ExportFormat::Pdf => self.to_pdf(&markdown).await?,
        };

        Ok(ExportedDocument::report(content, format))
    }

    async fn is_available(&self) -> bool {
        self.check_pandoc().await
    }
}

fn wrap_html(body: String) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="navsense-report">
{body}
    </article>
</body>
</html>"#,
        title = REPORT_TITLE,
        css = REPORT_CSS,
        body = body
    )
}

const REPORT_CSS: &str = r#"
:root {
    --primary-color: #1e3a8a;
    --secondary-color: #16a34a;
    --text-color: #1f2937;
    --muted-color: #6b7280;
    --border-color: #e5e7eb;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
    color: var(--text-color);
    max-width: 900px;
    margin: 0 auto;
    padding: 2rem;
}

h1 {
    color: var(--primary-color);
    border-bottom: 2px solid var(--primary-color);
    padding-bottom: 0.5rem;
}

h2 {
    color: var(--primary-color);
    border-bottom: 1px solid var(--border-color);
    padding-bottom: 0.25rem;
}

table {
    width: 100%;
    border-collapse: collapse;
    margin: 1em 0;
}

th, td {
    padding: 0.5rem;
    text-align: left;
    border: 1px solid var(--border-color);
}

a {
    color: var(--secondary-color);
}

em {
    color: var(--muted-color);
    font-size: 0.85em;
}

@media print {
    body {
        font-size: 12pt;
        padding: 0;
    }

    h1, h2, h3 {
        page-break-after: avoid;
    }
}
"#;
