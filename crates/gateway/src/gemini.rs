//! Gemini `generateContent` client.
//!
//! Production [`ModelGateway`] implementation speaking the Google
//! Generative Language REST API. Vision calls attach the image as an
//! inline base64 part; chat calls replay the session history with a
//! system-level grounding instruction.
//!
//! Every request shares one pooled [`reqwest::Client`] with a bounded
//! timeout -- a hung provider call fails the request instead of hanging
//! the server.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use partlens_core::image::ImagePayload;
use partlens_core::prompts;
use partlens_core::session::{Role, Turn};

use crate::{GatewayError, ModelGateway};

/// Default base URL for the Generative Language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for image-grounded calls.
pub const DEFAULT_VISION_MODEL: &str = "gemini-1.5-flash";

/// Default model for text-only calls (summaries, chat turns).
pub const DEFAULT_CHAT_MODEL: &str = "gemini-1.5-flash";

/// Default per-call timeout. The upstream API has no inherent bound, so
/// this is what keeps a stuck provider from wedging a request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for [`GeminiGateway`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the Generative Language API.
    pub api_key: String,
    /// Base URL (override for proxies or test servers).
    pub api_base: String,
    /// Model used for calls that carry an image.
    pub vision_model: String,
    /// Model used for text-only calls.
    pub chat_model: String,
    /// Per-call timeout applied to the HTTP client.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Load from environment variables.
    ///
    /// | Env Var              | Default                           |
    /// |----------------------|-----------------------------------|
    /// | `GEMINI_API_KEY`     | *(required)*                      |
    /// | `GEMINI_API_BASE`    | the public `v1beta` endpoint      |
    /// | `GEMINI_VISION_MODEL`| `gemini-1.5-flash`                |
    /// | `GEMINI_CHAT_MODEL`  | `gemini-1.5-flash`                |
    /// | `MODEL_TIMEOUT_SECS` | `60`                              |
    pub fn from_env() -> Result<Self, GatewayError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GatewayError::NotConfigured("GEMINI_API_KEY is not set".to_string()))?;

        let api_base =
            std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let vision_model = std::env::var("GEMINI_VISION_MODEL")
            .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string());

        let chat_model =
            std::env::var("GEMINI_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        let timeout = std::env::var("MODEL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_key,
            api_base,
            vision_model,
            chat_model,
            timeout,
        })
    }
}

/// HTTP client for the Gemini `generateContent` endpoints.
pub struct GeminiGateway {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    /// Build a gateway from connection settings.
    ///
    /// Fails only if the underlying HTTP client cannot be constructed
    /// (e.g. no TLS backend available).
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Send one `generateContent` request and extract the answer text.
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GatewayError> {
        let url = format!("{}/models/{}:generateContent", self.config.api_base, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.first_text().ok_or(GatewayError::EmptyResponse)
    }

    /// One-shot vision request: a prompt plus the image as inline data.
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &ImagePayload,
    ) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::text(prompt),
                    Part::inline_image(image.mime_type(), image.bytes()),
                ],
            }],
            system_instruction: None,
        };

        tracing::debug!(
            model = %self.config.vision_model,
            prompt_len = prompt.len(),
            "Invoking vision model"
        );

        self.generate(&self.config.vision_model, &request).await
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn identify(&self, image: &ImagePayload) -> Result<String, GatewayError> {
        self.generate_with_image(prompts::IDENTIFY, image).await
    }

    async fn analyze(&self, image: &ImagePayload, prompt: &str) -> Result<String, GatewayError> {
        self.generate_with_image(prompt, image).await
    }

    async fn summarize(&self, raw_analysis: &str) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(&format!(
                    "{}\n\n{raw_analysis}",
                    prompts::SUMMARIZE
                ))],
            }],
            system_instruction: None,
        };

        tracing::debug!(model = %self.config.chat_model, "Invoking summarizer");
        self.generate(&self.config.chat_model, &request).await
    }

    async fn chat(
        &self,
        grounding: &str,
        history: &[Turn],
        user_text: &str,
    ) -> Result<String, GatewayError> {
        // Replay the stored turns in order, then append the new question.
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: Some(
                    match turn.role {
                        Role::Assistant => "model",
                        Role::User => "user",
                    }
                    .to_string(),
                ),
                parts: vec![Part::text(&turn.text)],
            })
            .collect();

        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(user_text)],
        });

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::text(&prompts::chat_grounding(grounding))],
            }),
        };

        tracing::debug!(
            model = %self.config.chat_model,
            turns = history.len(),
            "Invoking chat model"
        );
        self.generate(&self.config.chat_model, &request).await
    }
}

// ---- wire types ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_image(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(bytes),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    fn first_text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.parts;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
