//! Application router: API routes, health check and middleware.

use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::session::{session_routes, SessionHandlers};

/// Middleware settings for the application router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Deadline for a whole request, analysis included.
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(90),
        }
    }
}

/// Build the full application router.
pub fn app_router(handlers: SessionHandlers, config: &RouterConfig) -> Router {
    let health = Router::new()
        .route("/health", get(health))
        .with_state(handlers.clone());

    Router::new()
        .nest("/api/sessions", session_routes(handlers))
        .merge(health)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(config.request_timeout))
                .layer(cors_layer(&config.cors_origins)),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// GET /health - Liveness check
async fn health(State(handlers): State<SessionHandlers>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "backendConfigured": handlers.backend_configured(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::document::PulldownReportExporter;
    use crate::adapters::lead::InMemoryLeadRecorder;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::AnalysisGateway;

    fn router(gateway: AnalysisGateway) -> Router {
        let handlers = SessionHandlers::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(gateway),
            Arc::new(InMemoryLeadRecorder::new()),
            Arc::new(PulldownReportExporter::new()),
        );
        app_router(handlers, &RouterConfig::default())
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_backend_configuration() {
        let app = router(AnalysisGateway::unconfigured());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backendConfigured"], false);
    }

    #[tokio::test]
    async fn create_session_returns_201() {
        let app = router(AnalysisGateway::new(Arc::new(MockAIProvider::new())));
        let response = app
            .oneshot(
                Request::post("/api/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["stage"], "INPUT_URL");
        assert_eq!(body["backendConfigured"], true);
    }

    #[tokio::test]
    async fn malformed_session_id_is_400() {
        let app = router(AnalysisGateway::unconfigured());
        let response = app
            .oneshot(
                Request::get("/api/sessions/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
