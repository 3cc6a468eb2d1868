//! Question answering over a menu snapshot.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::MenuConciergeBuilder;
use crate::cache::{CacheKey, ResponseCache};
use crate::pipeline::{
    ParsedResponse, Topic, classify, compact, fallback, off_topic_message, parse, resolve,
    system_prompt,
};
use crate::providers::{CompletionProvider, CompletionRequest};
use crate::telemetry;
use crate::types::{MenuAnswer, MenuRequest, MenuSnapshot, Question};
use crate::{MenuError, Result};

/// Answers customer questions about a restaurant menu.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct MenuConcierge {
    provider: Option<Arc<dyn CompletionProvider>>,
    cache: Arc<ResponseCache>,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
}

impl MenuConcierge {
    /// Create a new builder for configuring the concierge.
    pub fn builder() -> MenuConciergeBuilder {
        MenuConciergeBuilder::new()
    }

    pub(super) fn from_parts(
        provider: Option<Arc<dyn CompletionProvider>>,
        cache: Arc<ResponseCache>,
        timeout: Duration,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            cache,
            timeout,
            max_tokens,
            temperature,
        }
    }

    /// The answer cache, shared with any other holder of the `Arc`.
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// True when no completion provider is configured.
    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    /// Validate a wire request and answer it.
    ///
    /// The only error is [`MenuError::InvalidInput`]; every failure after
    /// validation is absorbed into a fallback answer.
    pub async fn answer(&self, request: &MenuRequest) -> Result<MenuAnswer> {
        let (question, menu) = request.validate()?;
        Ok(self.ask(&question, menu).await)
    }

    /// Answer a validated question against a menu snapshot.
    #[instrument(
        name = "concierge.ask",
        skip(self, question, menu),
        fields(restaurant = %question.restaurant_id(), language = %question.language())
    )]
    pub async fn ask(&self, question: &Question, menu: &MenuSnapshot) -> MenuAnswer {
        let language = question.canned_language();

        if classify(question.text()) == Topic::OffTopic {
            debug!("question rejected as off-topic");
            record_outcome("off_topic");
            return MenuAnswer::text(off_topic_message(language));
        }

        let key = CacheKey::for_question(question);
        if let Some(entry) = self.cache.get(&key) {
            debug!("answer served from cache");
            record_outcome("cache_hit");
            return MenuAnswer {
                recommendations: resolve(&entry.recommendation_ids, menu),
                display_text: entry.answer_text,
            };
        }

        let Some(provider) = &self.provider else {
            record_outcome("fallback");
            return fallback::recommend(question.text(), language, menu);
        };

        match self.complete(provider.as_ref(), question, menu).await {
            Ok(parsed) => {
                let recommendations = resolve(&parsed.recommendation_ids, menu);
                self.cache
                    .put(key, parsed.display_text.clone(), parsed.recommendation_ids);
                record_outcome("llm");
                MenuAnswer {
                    display_text: parsed.display_text,
                    recommendations,
                }
            }
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    "completion failed, answering from fallback rules"
                );
                record_outcome("fallback");
                fallback::recommend(question.text(), language, menu)
            }
        }
    }

    async fn complete(
        &self,
        provider: &dyn CompletionProvider,
        question: &Question,
        menu: &MenuSnapshot,
    ) -> Result<ParsedResponse> {
        let prompt = system_prompt(&compact(menu))?;
        let request = CompletionRequest::new(prompt, question.text().trim())
            .max_tokens(self.max_tokens)
            .temperature(self.temperature);

        let raw = tokio::time::timeout(self.timeout, provider.complete(&request))
            .await
            .map_err(|_| MenuError::Timeout(self.timeout))??;

        if raw.trim().is_empty() {
            return Err(MenuError::EmptyResponse);
        }
        Ok(parse(&raw))
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!(telemetry::QUESTIONS_TOTAL, "outcome" => outcome).increment(1);
}
