//! `POST /analyze` -- run the analysis pipeline on an uploaded image.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use partlens_core::image::ImagePayload;
use partlens_pipeline::AnalysisPipeline;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body: a base64-encoded photograph of a component.
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub image: Option<String>,
}

/// Successful analysis: the summary plus a session id for follow-ups.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub session_id: Uuid,
}

/// Decode and validate the upload, run the pipeline, create a session
/// grounded on the summary.
///
/// The decoded image lives in an in-memory buffer owned by this handler,
/// so it is released when the handler returns -- on the error paths too.
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    let encoded = request
        .image
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::MissingField("image"))?;

    let gateway = state.gateway.clone().ok_or(AppError::GatewayUnavailable)?;

    let image = ImagePayload::from_base64(&encoded)?;
    let (width, height) = image.dimensions();
    tracing::info!(width, height, mime = image.mime_type(), "Received analysis request");

    let pipeline = AnalysisPipeline::new(gateway);
    let record = pipeline.run(&image).await?;

    // Sessions are created only for successful analyses; the summary
    // becomes the grounding turn for follow-up chat.
    let session_id = state.sessions.create(record.summary.clone()).await;
    tracing::info!(
        session_id = %session_id,
        classification = %record.classification,
        "Analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        analysis: record.summary,
        session_id,
    }))
}

/// Mount the analyze route.
pub fn router() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}
