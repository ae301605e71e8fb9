//! `POST /chat` -- grounded follow-up question for an analysis session.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Continue a session's conversation.
///
/// Snapshots the history, calls the chat model, and only then appends
/// the user/assistant exchange -- a gateway failure leaves the session
/// history exactly as it was, so an error can never become grounding
/// context for later turns.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let session_id = request
        .session_id
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::MissingField("session_id"))?;

    let message = request
        .message
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::MissingField("message"))?;

    let session_id = Uuid::parse_str(session_id.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid session id: {session_id}")))?;

    let gateway = state.gateway.clone().ok_or(AppError::GatewayUnavailable)?;

    let (grounding, history) = state.sessions.snapshot(session_id).await?;
    tracing::info!(%session_id, turns = history.len(), "Continuing chat");

    let answer = gateway.chat(&grounding, &history, &message).await?;

    state
        .sessions
        .append_exchange(session_id, message, answer.clone())
        .await?;

    Ok(Json(ChatResponse { response: answer }))
}

/// Mount the chat route.
pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}
