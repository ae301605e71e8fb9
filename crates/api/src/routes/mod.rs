pub mod analyze;
pub mod chat;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health      service health and gateway status (GET)
/// /analyze     run the analysis pipeline on an uploaded image (POST)
/// /chat        grounded follow-up question for a session (POST)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(analyze::router())
        .merge(chat::router())
}
