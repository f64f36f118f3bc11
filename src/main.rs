use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use navsense::adapters::ai::{GeminiConfig, GeminiProvider};
use navsense::adapters::document::PulldownReportExporter;
use navsense::adapters::http::{app_router, RouterConfig, SessionHandlers};
use navsense::adapters::lead::InMemoryLeadRecorder;
use navsense::adapters::storage::{IdleSessionSweeper, IdleSweeperConfig, InMemorySessionStore};
use navsense::application::AnalysisGateway;
use navsense::config::{AiConfig, AppConfig, ExportConfig};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_gateway(ai: &AiConfig) -> Result<AnalysisGateway, String> {
    let Some(api_key) = ai.api_key() else {
        tracing::warn!("API key not configured; analyses are disabled");
        return Ok(AnalysisGateway::unconfigured());
    };

    let provider = GeminiProvider::new(
        GeminiConfig::new(api_key)
            .with_model(ai.model.clone())
            .with_base_url(ai.base_url.clone())
            .with_timeout(ai.timeout()),
    )
    .map_err(|e| format!("failed to build Gemini client: {e}"))?;

    Ok(AnalysisGateway::new(Arc::new(provider))
        .with_timeout(ai.timeout())
        .with_temperature(ai.temperature))
}

fn build_exporter(export: &ExportConfig) -> PulldownReportExporter {
    let exporter = PulldownReportExporter::new().with_pdf_timeout(export.pdf_timeout_secs);
    match &export.pandoc_path {
        Some(path) => exporter.with_pandoc_path(path.clone()),
        None => exporter,
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    init_tracing(&config);
    config.validate().map_err(|e| e.to_string())?;

    let gateway = build_gateway(&config.ai)?;
    let exporter = build_exporter(&config.export);
    let store = Arc::new(
        InMemorySessionStore::new()
            .with_max_sessions(config.server.max_sessions)
            .with_idle_ttl(config.server.session_ttl()),
    );
    let sweeper = IdleSessionSweeper::new(
        store.clone(),
        IdleSweeperConfig::new(config.server.session_ttl()),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    let handlers = SessionHandlers::new(
        store,
        Arc::new(gateway),
        Arc::new(InMemoryLeadRecorder::new()),
        Arc::new(exporter),
    );

    let app = app_router(
        handlers,
        &RouterConfig {
            cors_origins: config.server.cors_origins_list(),
            request_timeout: config.server.request_timeout(),
        },
    );

    let addr = config.server.socket_addr().map_err(|e| e.to_string())?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("bind {addr} failed: {e}"))?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        backend_configured = config.ai.is_configured(),
        max_sessions = config.server.max_sessions,
        session_ttl_secs = config.server.session_ttl_secs,
        "navsense listening"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"));

    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper_task.await {
        tracing::warn!(error = %e, "Idle session sweeper did not stop cleanly");
    }
    served
}
