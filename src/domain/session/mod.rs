//! Session domain module.
//!
//! A session follows one visitor through the NavSense journey:
//! `InputUrl → Analyzing → SummaryResults → LeadCapture → DetailedReport`,
//! with `reset()` returning to `InputUrl` from anywhere.

mod aggregate;
mod errors;
mod stage;
mod view;

pub use aggregate::{
    AnalysisSession, AnalysisTicket, CompletionOutcome, SessionSnapshot, SubmitOutcome,
};
pub use errors::{SessionError, REPORT_DATA_NOT_FOUND_MESSAGE};
pub use stage::Stage;
pub use view::{
    View, GENERATING_REPORT_TEXT, NOT_CONFIGURED_VIEW_MESSAGE, PREPARING_RESULTS_TEXT,
};
