//! Liveness and health endpoints.
//!
//! `/health` only checks that credentials are present (best effort); it never
//! makes an upstream round trip.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};

use crate::server::AppState;

/// Handler for `GET /` — fixed liveness payload.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Receipt processing API is running.",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Handler for `GET /health` — credential presence per upstream.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let vision = state.config.vision_configured();
    let generative = state.config.generative_configured();

    let status = if vision && generative {
        "healthy"
    } else {
        "degraded"
    };

    Json(json!({
        "status": status,
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "api": "operational",
            "vision": if vision { "operational" } else { "not_configured" },
            "generative": if generative { "operational" } else { "not_configured" },
        },
    }))
}
