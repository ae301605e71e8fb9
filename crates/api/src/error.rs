use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use partlens_core::error::CoreError;
use partlens_gateway::GatewayError;
use partlens_pipeline::AnalysisError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, gateway, and pipeline error types and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent `{ "error": ..., "code": ... }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `partlens_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed analysis pipeline run.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// A direct gateway failure (chat continuation).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The model gateway was never configured (missing API key).
    #[error("Model gateway is not available")]
    GatewayUnavailable,

    /// A required request field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::UnknownSession { id } => (
                    StatusCode::NOT_FOUND,
                    "UNKNOWN_SESSION",
                    format!("Unknown session: {id}"),
                ),
                CoreError::ImageUnreadable(msg) => (
                    StatusCode::BAD_REQUEST,
                    "IMAGE_UNREADABLE",
                    format!("Unreadable image: {msg}"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // Pipeline failures carry the original provider detail so the
            // caller can tell which stage failed and why.
            AppError::Analysis(err) => {
                tracing::warn!(error = %err, "Analysis pipeline failed");
                let code = match err {
                    AnalysisError::Identify(_) => "IDENTIFY_FAILED",
                    AnalysisError::Unidentifiable(_) => "UNIDENTIFIABLE",
                    AnalysisError::Analyze(_) => "ANALYZE_FAILED",
                    AnalysisError::Summarize(_) => "SUMMARIZE_FAILED",
                };
                let status = match err {
                    AnalysisError::Unidentifiable(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, code, format!("Failed to process the image: {err}"))
            }

            AppError::Gateway(err) => {
                tracing::warn!(error = %err, "Gateway call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "GATEWAY_ERROR",
                    format!("Model call failed: {err}"),
                )
            }

            AppError::GatewayUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "GATEWAY_UNAVAILABLE",
                "Model gateway is not available; check GEMINI_API_KEY".to_string(),
            ),

            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_FIELD",
                format!("Missing required field: {field}"),
            ),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
