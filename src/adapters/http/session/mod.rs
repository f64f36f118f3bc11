//! HTTP adapter for analysis session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AnalyzeRequest, ErrorResponse, LeadRequest, ReportQuery, SessionResponse};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
