//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Text-generation backend used for site analysis
//! - `ReportExporter` - Renders the full report as a downloadable file
//! - `SessionStore` - Keeps live analysis sessions between requests
//! - `LeadRecorder` - Receives captured leads

mod ai_provider;
mod lead_recorder;
mod report_exporter;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    RequestMetadata, ResponseFormat, TokenUsage,
};
pub use lead_recorder::{LeadRecorder, LeadRecorderError};
pub use report_exporter::{
    ExportError, ExportFormat, ExportedDocument, ReportExporter, REPORT_BASE_FILENAME,
};
pub use session_store::{SessionHandle, SessionStore, SessionStoreError};
