//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    AnalysisGateway, AnalyzeUrlCommand, AnalyzeUrlHandler, ApplicationError,
    CreateSessionHandler, ExportReportCommand, ExportReportHandler, GetSessionHandler,
    GetSessionQuery, NavigateCommand, NavigateHandler, NavigationAction, SessionState,
    SubmitLeadCommand, SubmitLeadHandler,
};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::ports::{ExportError, ExportFormat, LeadRecorder, ReportExporter, SessionStore};

use super::dto::{AnalyzeRequest, ErrorResponse, LeadRequest, ReportQuery, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    create_handler: Arc<CreateSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    analyze_handler: Arc<AnalyzeUrlHandler>,
    navigate_handler: Arc<NavigateHandler>,
    lead_handler: Arc<SubmitLeadHandler>,
    export_handler: Arc<ExportReportHandler>,
    backend_configured: bool,
}

impl SessionHandlers {
    /// Wire every session handler over the same store.
    pub fn new(
        store: Arc<dyn SessionStore>,
        gateway: Arc<AnalysisGateway>,
        recorder: Arc<dyn LeadRecorder>,
        exporter: Arc<dyn ReportExporter>,
    ) -> Self {
        let configured = gateway.is_configured();
        Self {
            create_handler: Arc::new(CreateSessionHandler::new(store.clone(), configured)),
            get_handler: Arc::new(GetSessionHandler::new(store.clone(), configured)),
            analyze_handler: Arc::new(AnalyzeUrlHandler::new(store.clone(), gateway)),
            navigate_handler: Arc::new(NavigateHandler::new(store.clone(), configured)),
            lead_handler: Arc::new(SubmitLeadHandler::new(store.clone(), recorder, configured)),
            export_handler: Arc::new(ExportReportHandler::new(store, exporter)),
            backend_configured: configured,
        }
    }

    pub fn backend_configured(&self) -> bool {
        self.backend_configured
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Start a new session
pub async fn create_session(State(handlers): State<SessionHandlers>) -> Response {
    match handlers.create_handler.handle().await {
        Ok(state) => (StatusCode::CREATED, session_json(state)).into_response(),
        Err(e) => handle_application_error(e),
    }
}

/// GET /api/sessions/:id - Current session state and view
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(state) => (StatusCode::OK, session_json(state)).into_response(),
        Err(e) => handle_application_error(e),
    }
}

/// POST /api/sessions/:id/analyze - Submit a URL and wait for the analysis
pub async fn analyze_url(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AnalyzeUrlCommand {
        session_id,
        url: req.url,
    };

    match handlers.analyze_handler.handle(cmd).await {
        Ok(state) => (StatusCode::OK, session_json(state)).into_response(),
        Err(e) => handle_application_error(e),
    }
}

/// POST /api/sessions/:id/full-report - Move from summary to the lead form
pub async fn full_report(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigationAction::FullReport).await
}

/// POST /api/sessions/:id/back - Return from the lead form to the summary
pub async fn back(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigationAction::Back).await
}

/// POST /api/sessions/:id/reset - Start over
pub async fn reset(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigationAction::Reset).await
}

/// POST /api/sessions/:id/dismiss-error - Clear the error banner
pub async fn dismiss_error(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigationAction::DismissError).await
}

/// POST /api/sessions/:id/lead - Submit contact details
pub async fn submit_lead(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<LeadRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitLeadCommand {
        session_id,
        form: req.into(),
    };

    match handlers.lead_handler.handle(cmd).await {
        Ok(state) => (StatusCode::OK, session_json(state)).into_response(),
        Err(e) => handle_application_error(e),
    }
}

/// GET /api/sessions/:id/report?format=pdf|html|markdown - Download the full report
pub async fn export_report(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let format = match query.format.as_deref() {
        None => ExportFormat::default(),
        Some(raw) => match raw.parse::<ExportFormat>() {
            Ok(format) => format,
            Err(e) => return handle_application_error(e.into()),
        },
    };

    match handlers
        .export_handler
        .handle(ExportReportCommand { session_id, format })
        .await
    {
        Ok(document) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, document.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", document.filename),
                ),
            ],
            document.content,
        )
            .into_response(),
        Err(e) => handle_application_error(e),
    }
}

async fn navigate(handlers: SessionHandlers, session_id: &str, action: NavigationAction) -> Response {
    let session_id = match parse_session_id(session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .navigate_handler
        .handle(NavigateCommand { session_id, action })
        .await
    {
        Ok(state) => (StatusCode::OK, session_json(state)).into_response(),
        Err(e) => handle_application_error(e),
    }
}

fn session_json(state: SessionState) -> Json<SessionResponse> {
    Json(state.into())
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn status_for(error: &ApplicationError) -> StatusCode {
    match error.code() {
        ErrorCode::SessionNotFound | ErrorCode::ReportDataNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailed | ErrorCode::InvalidUrl => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidLead => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InvalidStateTransition | ErrorCode::AnalysisInFlight | ErrorCode::NotReady => {
            StatusCode::CONFLICT
        }
        ErrorCode::ExportFailed => match error {
            ApplicationError::Export(ExportError::ServiceUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::BAD_GATEWAY,
        },
        ErrorCode::SessionLimitReached => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_application_error(error: ApplicationError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return (
                status,
                Json(ErrorResponse::internal("An internal error occurred")),
            )
                .into_response();
        }
    }
    (status, Json(ErrorResponse::from(&error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::TargetUrlError;
    use crate::domain::session::{SessionError, Stage};

    #[test]
    fn session_not_found_maps_to_404() {
        let error = ApplicationError::from(SessionError::not_found(SessionId::new()));
        assert_eq!(handle_application_error(error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn report_data_not_found_maps_to_404() {
        let error = ApplicationError::from(SessionError::ReportDataNotFound);
        assert_eq!(handle_application_error(error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_url_maps_to_400() {
        let error = ApplicationError::from(TargetUrlError::Empty);
        assert_eq!(handle_application_error(error).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn state_conflicts_map_to_409() {
        let in_flight = ApplicationError::from(SessionError::AnalysisInFlight);
        assert_eq!(status_for(&in_flight), StatusCode::CONFLICT);

        let transition = ApplicationError::from(SessionError::invalid_transition(
            Stage::InputUrl,
            "go back",
        ));
        assert_eq!(status_for(&transition), StatusCode::CONFLICT);
    }

    #[test]
    fn export_failures_map_to_gateway_errors() {
        let unavailable = ApplicationError::from(ExportError::service_unavailable("no pandoc"));
        assert_eq!(status_for(&unavailable), StatusCode::SERVICE_UNAVAILABLE);

        let failed = ApplicationError::from(ExportError::pdf_failed("boom"));
        assert_eq!(status_for(&failed), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let error = ApplicationError::internal("join failed");
        assert_eq!(
            handle_application_error(error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
