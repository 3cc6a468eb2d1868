//! Answer cache for LLM-backed menu answers.
//!
//! [`ResponseCache`] memoizes successful LLM answers keyed on
//! `(restaurant, normalized question, language)` so that a repeated question
//! within the TTL costs no completion call. Only the answer text and the
//! recommended ids are stored; items are resolved against the caller's
//! snapshot on every hit.
//!
//! # Eviction
//!
//! There is no LRU and no background task. Entries expire lazily on `get`,
//! and each `put` that pushes the entry count above `max_entries` runs one
//! sweep removing every expired entry. Live entries are never evicted, so
//! the ceiling is a sweep trigger rather than a hard capacity.
//!
//! # Concurrency
//!
//! The map sits behind a single mutex held only for the duration of a lookup
//! or insert. There is no per-key single-flight: two requests that miss on
//! the same key at the same time each call the LLM and each write their
//! answer, and the later write wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use super::clock::{Clock, SystemClock};
use crate::telemetry;
use crate::types::Question;

/// Configuration for the answer cache.
///
/// ```rust
/// # use menuqa::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(5_000)
///     .ttl(Duration::from_secs(300));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Entry count above which a write triggers an expiry sweep. Default: 1,000.
    pub max_entries: usize,
    /// Time-to-live for cached answers. Default: 10 minutes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(10 * 60),
        }
    }
}

impl CacheConfig {
    /// Create a new config with the default TTL and sweep ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep ceiling.
    pub fn max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached answers.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cache key: restaurant, normalized question text, normalized language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    restaurant_id: String,
    question: String,
    language: String,
}

impl CacheKey {
    /// Build a key, lowercasing and trimming the question and language.
    pub fn new(restaurant_id: &str, question: &str, language: &str) -> Self {
        Self {
            restaurant_id: restaurant_id.to_string(),
            question: question.trim().to_lowercase(),
            language: language.trim().to_lowercase(),
        }
    }

    pub fn for_question(question: &Question) -> Self {
        Self::new(question.restaurant_id(), question.text(), question.language())
    }
}

/// A cached LLM answer.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub answer_text: String,
    pub recommendation_ids: Vec<String>,
    pub inserted_at: Instant,
}

/// Process-wide answer cache. Construct once and share via `Arc`.
pub struct ResponseCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Create a cache driven by the system clock.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache driven by a custom clock.
    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config: config.clone(),
            clock,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Look up a live entry.
    ///
    /// Returns `None` when the key is absent or its entry has reached the TTL.
    /// Expired entries are left in place for the next sweep.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let now = self.clock.now();
        let entries = self.lock();
        match entries.get(key) {
            Some(entry) if !self.is_expired(entry, now) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(entry.clone())
            }
            _ => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Insert or overwrite an entry, then sweep if above the ceiling.
    pub fn put(
        &self,
        key: CacheKey,
        answer_text: impl Into<String>,
        recommendation_ids: Vec<String>,
    ) {
        let now = self.clock.now();
        let mut entries = self.lock();
        entries.insert(
            key,
            CacheEntry {
                answer_text: answer_text.into(),
                recommendation_ids,
                inserted_at: now,
            },
        );
        if entries.len() > self.config.max_entries {
            self.sweep(&mut entries, now);
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry that has reached the TTL.
    fn sweep(&self, entries: &mut HashMap<CacheKey, CacheEntry>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let removed = before - entries.len();

        metrics::counter!(telemetry::CACHE_SWEEPS_TOTAL).increment(1);
        metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL).increment(removed as u64);
        debug!(removed, remaining = entries.len(), "swept expired answers");
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) >= self.config.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
