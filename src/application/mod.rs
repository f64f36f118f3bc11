//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The [`AnalysisGateway`] wraps the text-generation port; handlers drive the
//! session state machine around it.

mod analysis_gateway;
mod error;
pub mod handlers;

pub use analysis_gateway::{AnalysisGateway, DEFAULT_ANALYSIS_TIMEOUT};
pub use error::ApplicationError;
pub use handlers::{
    AnalyzeUrlCommand, AnalyzeUrlHandler, CreateSessionHandler, ExportReportCommand,
    ExportReportHandler, GetSessionHandler, GetSessionQuery, NavigateCommand, NavigateHandler,
    NavigationAction, SessionState, SubmitLeadCommand, SubmitLeadHandler,
};
