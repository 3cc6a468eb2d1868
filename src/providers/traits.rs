//! Completion provider trait.
//!
//! The LLM backend is reached through a single capability: turn a system
//! and user prompt into text. Implementations report every failure
//! (transport, non-2xx status, empty output) as an `Err`; the caller decides
//! what to do about it; no implementation should fall back on its own.
//!
//! Decorators such as [`RetryingCompletionProvider`](super::RetryingCompletionProvider)
//! wrap another provider behind the same trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::pipeline::prompt::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// One completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Request with the default token budget and temperature.
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A remote text-completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Complete the request, returning the model's text.
    ///
    /// Blank output must be reported as
    /// [`MenuError::EmptyResponse`](crate::MenuError::EmptyResponse).
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
