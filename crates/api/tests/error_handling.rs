//! Tests for `AppError` -> HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct
//! HTTP status code, error code, and message. They do NOT need an HTTP
//! server -- they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use http_body_util::BodyExt;
use uuid::Uuid;

use partlens_api::error::AppError;
use partlens_core::error::CoreError;
use partlens_gateway::GatewayError;
use partlens_pipeline::AnalysisError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn api_error(body: &str) -> GatewayError {
    GatewayError::Api {
        status: 503,
        body: body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: CoreError::UnknownSession maps to 404 with UNKNOWN_SESSION code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_session_returns_404() {
    let id = Uuid::new_v4();
    let err = AppError::Core(CoreError::UnknownSession { id });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "UNKNOWN_SESSION");
    assert_eq!(json["error"], format!("Unknown session: {id}"));
}

// ---------------------------------------------------------------------------
// Test: CoreError::ImageUnreadable maps to 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn image_unreadable_returns_400() {
    let err = AppError::Core(CoreError::ImageUnreadable("invalid base64".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "IMAGE_UNREADABLE");
}

// ---------------------------------------------------------------------------
// Test: pipeline failures map to 502 and keep the provider detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn identify_failure_returns_502_with_detail() {
    let err = AppError::Analysis(AnalysisError::Identify(api_error("quota exceeded")));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "IDENTIFY_FAILED");
    assert!(json["error"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn summarize_failure_is_distinguishable_from_identify() {
    let err = AppError::Analysis(AnalysisError::Summarize(api_error("quota exceeded")));

    let (_, json) = error_to_response(err).await;
    assert_eq!(json["code"], "SUMMARIZE_FAILED");
}

// ---------------------------------------------------------------------------
// Test: unidentifiable component maps to 422
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unidentifiable_returns_422() {
    let err = AppError::Analysis(AnalysisError::Unidentifiable(
        "Error: nothing in frame".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "UNIDENTIFIABLE");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to process the image"));
}

// ---------------------------------------------------------------------------
// Test: MissingField maps to 400 with the field name
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_field_returns_400() {
    let err = AppError::MissingField("image");

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MISSING_FIELD");
    assert_eq!(json["error"], "Missing required field: image");
}

// ---------------------------------------------------------------------------
// Test: GatewayUnavailable maps to 503
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gateway_unavailable_returns_503() {
    let (status, json) = error_to_response(AppError::GatewayUnavailable).await;

    assert_eq!(status, axum::http::StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "GATEWAY_UNAVAILABLE");
}
