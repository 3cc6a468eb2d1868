//! Retry configuration, delay calculation, and the retrying provider decorator.
//!
//! Retries belong to the transport layer: [`RetryingCompletionProvider`]
//! wraps a [`CompletionProvider`] and retries transient failures before the
//! pipeline ever sees them. The pipeline itself makes exactly one completion
//! attempt per question.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::traits::{CompletionProvider, CompletionRequest};
use crate::telemetry;
use crate::{MenuError, Result};

/// Configuration for retry behaviour on transient errors.
///
/// Uses exponential backoff, capped at `max_delay`:
///
/// ```rust
/// # use menuqa::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(3)
///     .initial_delay(Duration::from_millis(200));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 2.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 250ms.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 2s.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Delay before retry number `attempt` (0-indexed).
    ///
    /// `initial_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Delay honouring a provider `retry_after` hint when present.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after
            .map(|hint| hint.min(self.max_delay))
            .unwrap_or_else(|| self.delay_for_attempt(attempt))
    }
}

/// Decorator that wraps a [`CompletionProvider`] with retry logic.
///
/// Retries errors classified as transient by [`MenuError::is_transient()`];
/// permanent errors are returned immediately.
pub struct RetryingCompletionProvider {
    inner: Arc<dyn CompletionProvider>,
    config: RetryConfig,
}

impl RetryingCompletionProvider {
    /// Wrap a completion provider with retry logic.
    pub fn new(inner: Arc<dyn CompletionProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl CompletionProvider for RetryingCompletionProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let provider = self.inner.name();
        let mut last_err = None;

        for attempt in 0..self.config.max_attempts.max(1) {
            match self.inner.complete(request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() => {
                    if attempt + 1 < self.config.max_attempts {
                        metrics::counter!(
                            telemetry::RETRIES_TOTAL,
                            "provider" => provider.to_owned()
                        )
                        .increment(1);
                        let delay = self.config.effective_delay(attempt, e.retry_after());
                        warn!(
                            provider,
                            attempt = attempt + 1,
                            max_attempts = self.config.max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "retrying completion after transient error"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or(MenuError::EmptyResponse))
    }
}
