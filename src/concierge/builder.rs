//! Builder for configuring concierge instances

use std::sync::Arc;
use std::time::Duration;

use super::MenuConcierge;
use crate::cache::{CacheConfig, Clock, ResponseCache, SystemClock};
use crate::pipeline::prompt::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::providers::{CompletionProvider, OpenAiClient, RetryConfig, RetryingCompletionProvider};
use crate::{MenuError, Result};

/// Upper bound on a single completion call, retries included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for configuring concierge instances.
pub struct MenuConciergeBuilder {
    openai_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    provider: Option<Arc<dyn CompletionProvider>>,
    retry: RetryConfig,
    cache: Option<Arc<ResponseCache>>,
    cache_config: CacheConfig,
    clock: Option<Arc<dyn Clock>>,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
    offline: bool,
}

impl MenuConciergeBuilder {
    pub fn new() -> Self {
        Self {
            openai_key: None,
            base_url: None,
            model: None,
            provider: None,
            retry: RetryConfig::disabled(),
            cache: None,
            cache_config: CacheConfig::default(),
            clock: None,
            timeout: DEFAULT_TIMEOUT,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            offline: false,
        }
    }

    /// Configure the OpenAI-compatible completion provider.
    pub fn openai(mut self, api_key: impl Into<String>) -> Self {
        self.openai_key = Some(api_key.into());
        self
    }

    /// Point the OpenAI client at a compatible server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Model sent with every completion request.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Use a custom completion provider. Takes precedence over [`openai`](Self::openai).
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Retry transient provider errors (default: single attempt).
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Share an existing answer cache.
    pub fn cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// TTL and size ceiling for the cache the builder creates.
    ///
    /// Ignored when a cache is passed via [`cache`](Self::cache).
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Time source for the cache the builder creates.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Time limit for one completion call (default: 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Answer every on-topic question from the fallback rules.
    ///
    /// Lets the concierge run without any provider configured.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Build the concierge.
    ///
    /// Fails with [`MenuError::Configuration`] when no provider is configured
    /// and offline mode is off.
    pub fn build(self) -> Result<MenuConcierge> {
        let provider: Option<Arc<dyn CompletionProvider>> = if self.offline {
            None
        } else if let Some(provider) = self.provider {
            Some(provider)
        } else if let Some(key) = self.openai_key {
            if key.trim().is_empty() {
                return Err(MenuError::Configuration("OpenAI API key is empty".into()));
            }
            let mut client = match self.base_url {
                Some(url) => OpenAiClient::with_base_url(key, url),
                None => OpenAiClient::new(key),
            };
            if let Some(model) = self.model {
                client = client.model(model);
            }
            Some(Arc::new(client))
        } else {
            return Err(MenuError::Configuration(
                "no completion provider configured; call .openai(), .provider() or .offline()"
                    .into(),
            ));
        };

        let provider = provider.map(|inner| -> Arc<dyn CompletionProvider> {
            if self.retry.max_attempts > 1 {
                Arc::new(RetryingCompletionProvider::new(inner, self.retry.clone()))
            } else {
                inner
            }
        });

        let cache = match self.cache {
            Some(cache) => cache,
            None => {
                let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
                Arc::new(ResponseCache::with_clock(&self.cache_config, clock))
            }
        };

        Ok(MenuConcierge::from_parts(
            provider,
            cache,
            self.timeout,
            self.max_tokens,
            self.temperature,
        ))
    }
}

impl Default for MenuConciergeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
