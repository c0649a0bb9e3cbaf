//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    /// Configured webhook base URL. Reported as-is, never contacted.
    pub upstream: String,
}

/// GET /health - Report liveness and the configured upstream.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.metrics.uptime_seconds(),
        upstream: state.config.upstream.base_url.clone(),
    })
}
