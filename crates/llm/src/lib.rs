//! LeadRouter LLM provider infrastructure adapter.
//!
//! Implements the [`pipeline::LlmProvider`] trait for Google's Gemini
//! `generateContent` API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting and response
//! envelope decoding live here. Retry and back-off do not: each
//! [`LlmProvider::generate`] call performs exactly one request, and the
//! classifier in the `nodes` crate decides whether to try again.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{LlmError, LlmProvider, ModelConfig};
use reqwest::{header::RETRY_AFTER, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider bound to one model.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    config: ModelConfig,
}

impl GeminiProvider {
    /// Creates a provider from validated configuration.
    ///
    /// # Errors
    ///
    /// [`LlmError::Transport`] when the HTTP client cannot be built (e.g. the
    /// TLS backend fails to initialise).
    pub fn new(config: &ModelConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a provider that shares an existing HTTP client.
    pub fn with_client(client: Client, config: &ModelConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model_name
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    #[instrument(skip_all, fields(model = %self.config.model_name))]
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.config.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Gemini responded");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(LlmError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        body.first_text().ok_or(LlmError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}
