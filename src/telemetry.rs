//! Telemetry metric name constants.
//!
//! Centralised metric names for menuqa operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `menuqa_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `outcome`: how a question was answered: "off_topic", "cache_hit",
//!   "llm" or "fallback"
//! - `provider`: completion provider name (e.g. "openai")
//! - `status`: outcome of a completion call: "ok" or "error"

/// Total questions answered.
///
/// Labels: `outcome`.
pub const QUESTIONS_TOTAL: &str = "menuqa_questions_total";

/// Total completion calls made.
///
/// Labels: `provider`, `status` ("ok" | "error").
pub const LLM_REQUESTS_TOTAL: &str = "menuqa_llm_requests_total";

/// Completion call duration in seconds.
///
/// Labels: `provider`.
pub const LLM_REQUEST_DURATION_SECONDS: &str = "menuqa_llm_request_duration_seconds";

/// Total completion retry attempts (not counting the initial request).
///
/// Labels: `provider`.
pub const RETRIES_TOTAL: &str = "menuqa_retries_total";

/// Total answer cache hits.
pub const CACHE_HITS_TOTAL: &str = "menuqa_cache_hits_total";

/// Total answer cache misses, expired entries included.
pub const CACHE_MISSES_TOTAL: &str = "menuqa_cache_misses_total";

/// Total expiry sweeps triggered by writes above the ceiling.
pub const CACHE_SWEEPS_TOTAL: &str = "menuqa_cache_sweeps_total";

/// Total expired entries removed by sweeps.
pub const CACHE_EVICTIONS_TOTAL: &str = "menuqa_cache_evictions_total";
