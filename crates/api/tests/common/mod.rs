#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use partlens_api::config::ServerConfig;
use partlens_api::routes;
use partlens_api::state::AppState;
use partlens_core::image::ImagePayload;
use partlens_core::session::{SessionStore, Turn};
use partlens_gateway::{GatewayError, ModelGateway};

/// Smallest valid 1x1 PNG; used wherever a test needs a real image.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00, 0x00, 0x3a,
    0x7e, 0x9b, 0x55, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x62,
    0x00, 0x00, 0x00, 0x06, 0x00, 0x03, 0x36, 0x37, 0x7c, 0xa8, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// A scripted reply for one mock gateway operation.
#[derive(Clone)]
pub enum Scripted {
    Ok(&'static str),
    /// Provider non-2xx: status and body.
    ApiErr(u16, &'static str),
}

impl Scripted {
    fn resolve(&self) -> Result<String, GatewayError> {
        match self {
            Scripted::Ok(text) => Ok(text.to_string()),
            Scripted::ApiErr(status, body) => Err(GatewayError::Api {
                status: *status,
                body: body.to_string(),
            }),
        }
    }
}

/// Deterministic gateway with per-operation scripts and call counters.
///
/// Lets API tests assert both the HTTP behaviour and the short-circuit
/// properties (which model calls were actually made).
#[derive(Default)]
pub struct MockGateway {
    pub identify_script: Mutex<Option<Scripted>>,
    pub analyze_script: Mutex<Option<Scripted>>,
    pub summarize_script: Mutex<Option<Scripted>>,
    pub chat_script: Mutex<Option<Scripted>>,
    pub identify_calls: AtomicUsize,
    pub analyze_calls: AtomicUsize,
    pub summarize_calls: AtomicUsize,
    pub chat_calls: AtomicUsize,
    /// Arguments of the most recent chat call: (grounding, history length,
    /// user text).
    pub last_chat: Mutex<Option<(String, usize, String)>>,
}

impl MockGateway {
    pub fn scripted(
        identify: Scripted,
        analyze: Scripted,
        summarize: Scripted,
        chat: Scripted,
    ) -> Arc<Self> {
        let mock = Self::default();
        *mock.identify_script.lock().unwrap() = Some(identify);
        *mock.analyze_script.lock().unwrap() = Some(analyze);
        *mock.summarize_script.lock().unwrap() = Some(summarize);
        *mock.chat_script.lock().unwrap() = Some(chat);
        Arc::new(mock)
    }

    fn run_script(slot: &Mutex<Option<Scripted>>) -> Result<String, GatewayError> {
        slot.lock()
            .unwrap()
            .as_ref()
            .expect("operation was not scripted")
            .resolve()
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn identify(&self, _image: &ImagePayload) -> Result<String, GatewayError> {
        self.identify_calls.fetch_add(1, Ordering::SeqCst);
        Self::run_script(&self.identify_script)
    }

    async fn analyze(&self, _image: &ImagePayload, _prompt: &str) -> Result<String, GatewayError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        Self::run_script(&self.analyze_script)
    }

    async fn summarize(&self, _raw: &str) -> Result<String, GatewayError> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        Self::run_script(&self.summarize_script)
    }

    async fn chat(
        &self,
        grounding: &str,
        history: &[Turn],
        user_text: &str,
    ) -> Result<String, GatewayError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_chat.lock().unwrap() =
            Some((grounding.to_string(), history.len(), user_text.to_string()));
        Self::run_script(&self.chat_script)
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_secs: 3600,
    }
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses. Returns the session
/// store alongside the app so tests can inspect conversation state.
pub fn build_test_app(gateway: Option<Arc<dyn ModelGateway>>) -> (Router, Arc<SessionStore>) {
    let config = test_config();
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(config.session_ttl_secs)));

    let state = AppState {
        config: Arc::new(config),
        gateway,
        sessions: Arc::clone(&sessions),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        .merge(routes::router())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    (app, sessions)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
