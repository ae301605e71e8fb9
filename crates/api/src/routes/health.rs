use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a model gateway was configured at startup.
    pub gateway_configured: bool,
    /// Number of live chat sessions.
    pub live_sessions: usize,
}

/// GET /health -- returns service and gateway status.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let gateway_configured = state.gateway.is_some();
    let status = if gateway_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        gateway_configured,
        live_sessions: state.sessions.len().await,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
