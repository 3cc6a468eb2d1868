//! OpenAI-compatible chat completions client.
//!
//! Talks to any endpoint implementing `POST /v1/chat/completions` (OpenAI,
//! OpenRouter, a local llama.cpp or vLLM server, ...).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::traits::{CompletionProvider, CompletionRequest};
use crate::telemetry;
use crate::{MenuError, Result};

/// Default base URL for the OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default model for menu answers.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Client for an OpenAI-compatible completion endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: Client,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Create a client for the OpenAI API with the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for compatible servers and wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_http_client(api_key, base_url, Client::new())
    }

    /// Create a client sharing an existing HTTP connection pool.
    pub fn with_http_client(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        http: Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the model name sent with every request.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn check_status(response: &reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 | 403 => Err(MenuError::AuthenticationFailed),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(MenuError::RateLimited { retry_after })
            }
            code => Err(MenuError::Api {
                status: code,
                message: format!("completion API error: {status}"),
            }),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(name = "openai.complete", skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| MenuError::Http(e.to_string()))?;

            Self::check_status(&response)?;

            let completion: ChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| MenuError::Http(e.to_string()))?;

            completion
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|text| !text.trim().is_empty())
                .ok_or(MenuError::EmptyResponse)
        }
        .await;

        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::LLM_REQUESTS_TOTAL,
            "provider" => "openai",
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::LLM_REQUEST_DURATION_SECONDS, "provider" => "openai")
            .record(start.elapsed().as_secs_f64());

        result
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
