//! Router and listener setup.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::protocol::{
    EXPORT_ROUTE, EXPORT_ROUTE_ALIAS, HEALTH_ROUTE, MAX_BODY_BYTES, PLATFORM_HEADER,
    PLATFORM_URL_HEADER,
};

use super::handlers;

/// State shared by all handlers. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // Browsers only expose listed headers to scripts; the front-end needs these two.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            header::CONTENT_DISPOSITION,
            HeaderName::from_static(PLATFORM_URL_HEADER),
            HeaderName::from_static(PLATFORM_HEADER),
        ]);

    Router::new()
        .route(HEALTH_ROUTE, get(handlers::health))
        .route(EXPORT_ROUTE, post(handlers::export))
        .route(EXPORT_ROUTE_ALIAS, post(handlers::export))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the export server until Ctrl+C.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tokio::fs::create_dir_all(&config.export.export_dir).await?;

    let addr = config.bind_addr();
    let font_available = config.export.font_path.is_file();
    let listener = TcpListener::bind(&addr).await?;

    info!(
        %addr,
        export_dir = %config.export.export_dir.display(),
        upload_dir = %config.upload_dir.display(),
        font = %config.export.font_path.display(),
        font_available,
        "Quiz export server listening"
    );

    let app = router(AppState::new(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
