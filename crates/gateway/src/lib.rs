//! Model gateway: the seam between the analysis pipeline and hosted
//! vision/chat models.
//!
//! [`ModelGateway`] is the capability the rest of the system consumes --
//! "given a prompt and optional image, return text or fail". The
//! production implementation is [`gemini::GeminiGateway`]; tests inject
//! scripted fakes.

pub mod gemini;

use async_trait::async_trait;
use partlens_core::image::ImagePayload;
use partlens_core::session::Turn;

/// Errors from the model provider layer.
///
/// These flow through the pipeline as ordinary data (every stage returns
/// `Result`), so a provider failure routes to the error terminal instead
/// of unwinding across the pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Required configuration is missing; the gateway was never built.
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered 2xx but produced no candidate text.
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// Calls to the hosted vision/chat models.
///
/// One method per pipeline operation. Implementations must never panic
/// on provider failure -- every fault is a [`GatewayError`] value.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Ask the vision model for a single-word component category.
    async fn identify(&self, image: &ImagePayload) -> Result<String, GatewayError>;

    /// Run a specialist prompt against the image, returning free-text
    /// analysis.
    async fn analyze(&self, image: &ImagePayload, prompt: &str) -> Result<String, GatewayError>;

    /// Compress a raw specialist analysis into a bulleted digest.
    async fn summarize(&self, raw_analysis: &str) -> Result<String, GatewayError>;

    /// Produce the next assistant turn for a grounded conversation.
    ///
    /// `grounding` is the original analysis (session turn 0), `history`
    /// is the full ordered turn sequence, and `user_text` is the new
    /// question being asked.
    async fn chat(
        &self,
        grounding: &str,
        history: &[Turn],
        user_text: &str,
    ) -> Result<String, GatewayError>;
}
