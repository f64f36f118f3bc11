//! Report Exporter Port - Turns a completed analysis into a downloadable file.
//!
//! The session guarantees the `(AnalysisResult, LeadData)` pair exists before
//! an exporter is called; exporters only decide layout and file format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::analysis::AnalysisResult;
use crate::domain::lead::LeadData;

/// Base filename of every exported report; the extension follows the format.
pub const REPORT_BASE_FILENAME: &str = "NavSenseAI_Full_Report";

/// Port for exporting the full report.
#[async_trait]
pub trait ReportExporter: Send + Sync {
    /// Render the report for `lead` in `format`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if rendering or conversion fails.
    async fn export(
        &self,
        result: &AnalysisResult,
        lead: &LeadData,
        format: ExportFormat,
    ) -> Result<ExportedDocument, ExportError>;

    /// Check if every format can currently be produced.
    ///
    /// PDF output depends on an external converter; used by health checks.
    async fn is_available(&self) -> bool;
}

/// Export formats supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// PDF document.
    #[default]
    Pdf,
    /// HTML document.
    Html,
    /// Raw markdown.
    Markdown,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Html => write!(f, "html"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            "html" | "htm" => Ok(ExportFormat::Html),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a report document named `NavSenseAI_Full_Report.<ext>`.
    pub fn report(content: Vec<u8>, format: ExportFormat) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", REPORT_BASE_FILENAME, format.extension()),
            format,
        }
    }
}

/// Errors that can occur during report export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// External converter (e.g., Pandoc) is not available.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Conversion to PDF failed.
    #[error("PDF conversion failed: {0}")]
    PdfConversionFailed(String),

    /// Timeout during conversion.
    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    /// I/O error during conversion.
    #[error("I/O error during export: {0}")]
    IoError(String),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfConversionFailed(reason.into())
    }

    pub fn io_error(reason: impl Into<String>) -> Self {
        Self::IoError(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_pdf() {
        assert_eq!(ExportFormat::default(), ExportFormat::Pdf);
    }

    #[test]
    fn export_format_parses_from_string() {
        assert_eq!("markdown".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("htm".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
    }

    #[test]
    fn export_format_parse_rejects_unknown_format() {
        let result = "docx".parse::<ExportFormat>();
        assert!(matches!(result, Err(ExportError::UnsupportedFormat(_))));
    }

    #[test]
    fn report_document_uses_fixed_base_name() {
        let doc = ExportedDocument::report(vec![0x25, 0x50, 0x44, 0x46], ExportFormat::Pdf);
        assert_eq!(doc.filename, "NavSenseAI_Full_Report.pdf");
        assert_eq!(doc.content_type, "application/pdf");

        let doc = ExportedDocument::report(b"# Report".to_vec(), ExportFormat::Markdown);
        assert_eq!(doc.filename, "NavSenseAI_Full_Report.md");
    }

    #[test]
    fn report_exporter_is_object_safe() {
        fn check<T: ReportExporter + ?Sized>() {}
        check::<dyn ReportExporter>();
    }
}
