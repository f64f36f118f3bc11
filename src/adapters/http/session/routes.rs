//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    analyze_url, back, create_session, dismiss_error, export_report, full_report, get_session,
    reset, submit_lead, SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session))
        .route("/:id/analyze", post(analyze_url))
        .route("/:id/full-report", post(full_report))
        .route("/:id/back", post(back))
        .route("/:id/reset", post(reset))
        .route("/:id/dismiss-error", post(dismiss_error))
        .route("/:id/lead", post(submit_lead))
        .route("/:id/report", get(export_report))
        .with_state(handlers)
}
