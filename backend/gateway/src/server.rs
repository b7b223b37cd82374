//! Main HTTP server: application state, router assembly, and serving.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use recibo_config::Config;
use recibo_core::{OcrProvider, StructuringProvider};

use crate::{health, process};

/// Application state shared across routes.
///
/// Immutable after startup; requests share nothing mutable, so concurrent
/// uploads are fully isolated.
pub struct AppState {
    pub config: Config,
    pub ocr: Arc<dyn OcrProvider>,
    pub structurer: Arc<dyn StructuringProvider>,
}

/// Build the Axum router with all routes and layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Headroom over the raw image size for multipart framing.
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/process-receipt/", post(process::process_receipt))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start_server(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);

    info!("recibo HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
