//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use menuqa::cache::{CacheConfig, CacheKey, ManualClock, ResponseCache};
use menuqa::providers::{
    CompletionProvider, CompletionRequest, OpenAiClient, RetryConfig, RetryingCompletionProvider,
};
use menuqa::telemetry;
use menuqa::{
    Category, MenuAnswer, MenuConcierge, MenuError, MenuItem, MenuSnapshot, Question, Restaurant,
    Result,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Mock providers
// ============================================================================

struct AnsweringProvider;

#[async_trait]
impl CompletionProvider for AnsweringProvider {
    fn name(&self) -> &str {
        "answering"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Ok("Soup. RECOMMENDED_IDS: [m1]".into())
    }
}

struct FlakyProvider;

#[async_trait]
impl CompletionProvider for FlakyProvider {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Err(MenuError::Http("reset".into()))
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Sum counter values for a metric name carrying a specific label value.
fn counter_with_label(snapshot: &SnapshotVec, name: &str, label: &str, value: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == label && l.value() == value)
        })
        .map(|(_, _, _, v)| match v {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

fn menu() -> MenuSnapshot {
    MenuSnapshot::new(
        Restaurant {
            id: "r1".into(),
            name: "R".into(),
        },
        vec![Category::new("c1", "Main", vec![MenuItem::new("m1", "Soup", 4.0)])],
    )
}

/// Ask a series of questions with a local recorder installed.
fn ask_all(
    recorder: &DebuggingRecorder,
    concierge: &MenuConcierge,
    questions: &[(&str, &str)],
) -> Vec<MenuAnswer> {
    let menu = menu();
    metrics::with_local_recorder(recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let mut answers = Vec::new();
                for (text, lang) in questions {
                    let question = Question::new("r1", *text, *lang).unwrap();
                    answers.push(concierge.ask(&question, &menu).await);
                }
                answers
            })
        })
    })
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn question_outcomes_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let concierge = MenuConcierge::builder()
        .provider(Arc::new(AnsweringProvider))
        .build()
        .unwrap();

    ask_all(
        &recorder,
        &concierge,
        &[
            ("What soup do you have?", "en"),
            ("What soup do you have?", "en"),
            ("What is the capital of France?", "en"),
        ],
    );

    let snapshot = snapshotter.snapshot().into_vec();
    let q = telemetry::QUESTIONS_TOTAL;
    assert_eq!(counter_total(&snapshot, q), 3);
    assert_eq!(counter_with_label(&snapshot, q, "outcome", "llm"), 1);
    assert_eq!(counter_with_label(&snapshot, q, "outcome", "cache_hit"), 1);
    assert_eq!(counter_with_label(&snapshot, q, "outcome", "off_topic"), 1);

    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn fallback_outcome_and_retries_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let concierge = MenuConcierge::builder()
        .provider(Arc::new(FlakyProvider))
        .retry(
            RetryConfig::new()
                .max_attempts(3)
                .initial_delay(Duration::from_millis(1)),
        )
        .build()
        .unwrap();

    let answers = ask_all(&recorder, &concierge, &[("What soup do you have?", "en")]);
    assert_eq!(answers[0].recommendation_ids(), vec!["m1"]);

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_with_label(&snapshot, telemetry::QUESTIONS_TOTAL, "outcome", "fallback"),
        1
    );
    assert_eq!(
        counter_with_label(&snapshot, telemetry::RETRIES_TOTAL, "provider", "flaky"),
        2,
        "two retries after the initial attempt"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn http_client_records_request_metrics() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let client: Arc<dyn CompletionProvider> = Arc::new(RetryingCompletionProvider::new(
        Arc::new(OpenAiClient::with_base_url("k", mock_server.uri())),
        RetryConfig::disabled(),
    ));

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(async { client.complete(&CompletionRequest::new("s", "u")).await })
        })
    });
    assert!(result.is_err());

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_with_label(&snapshot, telemetry::LLM_REQUESTS_TOTAL, "status", "error"),
        1
    );
    assert!(
        has_histogram(&snapshot, telemetry::LLM_REQUEST_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
}

#[test]
fn cache_sweeps_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let clock = Arc::new(ManualClock::new());
    let config = CacheConfig::new()
        .max_entries(1)
        .ttl(Duration::from_secs(1));
    let cache = ResponseCache::with_clock(&config, clock.clone());

    metrics::with_local_recorder(&recorder, || {
        cache.put(CacheKey::new("r", "a", "en"), "a", vec![]);
        clock.advance(Duration::from_secs(2));
        cache.put(CacheKey::new("r", "b", "en"), "b", vec![]);
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_SWEEPS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_EVICTIONS_TOTAL), 1);
}
