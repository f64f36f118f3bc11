//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod session;

pub use session::{
    AnalyzeUrlCommand, AnalyzeUrlHandler, CreateSessionHandler, ExportReportCommand,
    ExportReportHandler, GetSessionHandler, GetSessionQuery, NavigateCommand, NavigateHandler,
    NavigationAction, SessionState, SubmitLeadCommand, SubmitLeadHandler,
};
