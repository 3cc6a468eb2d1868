//! Tests for [`ResponseCache`]: TTL expiry and sweep-on-write eviction.

use std::sync::Arc;
use std::time::Duration;

use menuqa::cache::{CacheConfig, CacheKey, ManualClock, ResponseCache};
use menuqa::Question;

fn key(question: &str) -> CacheKey {
    CacheKey::new("r1", question, "bg")
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// =========================================================================
// CacheConfig
// =========================================================================

#[test]
fn cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.max_entries, 1_000);
    assert_eq!(config.ttl, Duration::from_secs(600));
}

#[test]
fn cache_config_builder() {
    let config = CacheConfig::new()
        .max_entries(500)
        .ttl(Duration::from_secs(60));
    assert_eq!(config.max_entries, 500);
    assert_eq!(config.ttl, Duration::from_secs(60));
}

// =========================================================================
// Lookup
// =========================================================================

#[test]
fn miss_then_hit() {
    let cache = ResponseCache::default();

    assert!(cache.get(&key("люто?")).is_none());

    cache.put(key("люто?"), "Диавола.", ids(&["p1"]));

    let entry = cache.get(&key("люто?")).expect("entry should be cached");
    assert_eq!(entry.answer_text, "Диавола.");
    assert_eq!(entry.recommendation_ids, ids(&["p1"]));
}

#[test]
fn question_key_ignores_case_and_padding() {
    let cache = ResponseCache::default();
    let typed = Question::new("r1", "  Какво е ЛЮТО?", "BG").unwrap();

    cache.put(CacheKey::for_question(&typed), "answer", vec![]);

    assert!(cache.get(&CacheKey::new("r1", "какво е люто?", "bg")).is_some());
    assert!(cache.get(&CacheKey::new("r2", "какво е люто?", "bg")).is_none());
}

#[test]
fn overwrite_keeps_last_write() {
    let cache = ResponseCache::default();

    cache.put(key("q"), "first", ids(&["a"]));
    cache.put(key("q"), "second", ids(&["b"]));

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&key("q")).unwrap().answer_text, "second");
}

#[test]
fn overwrite_refreshes_insertion_time() {
    let clock = Arc::new(ManualClock::new());
    let cache = ResponseCache::with_clock(
        &CacheConfig::new().ttl(Duration::from_secs(10)),
        clock.clone(),
    );

    cache.put(key("q"), "first", vec![]);
    clock.advance(Duration::from_secs(8));
    cache.put(key("q"), "second", vec![]);
    clock.advance(Duration::from_secs(8));

    assert!(cache.get(&key("q")).is_some());
}

// =========================================================================
// Expiry
// =========================================================================

#[test]
fn entry_lives_until_ttl() {
    let clock = Arc::new(ManualClock::new());
    let cache = ResponseCache::with_clock(&CacheConfig::default(), clock.clone());

    cache.put(key("q"), "answer", vec![]);

    clock.advance(Duration::from_secs(9 * 60));
    assert!(cache.get(&key("q")).is_some());

    clock.advance(Duration::from_secs(60));
    assert!(cache.get(&key("q")).is_none());
    // Expired but not yet swept.
    assert_eq!(cache.len(), 1);
}

#[test]
fn sweep_keeps_live_entries() {
    let clock = Arc::new(ManualClock::new());
    let config = CacheConfig::new()
        .max_entries(3)
        .ttl(Duration::from_secs(60));
    let cache = ResponseCache::with_clock(&config, clock.clone());

    cache.put(key("old-1"), "x", vec![]);
    cache.put(key("old-2"), "x", vec![]);
    clock.advance(Duration::from_secs(61));
    cache.put(key("new-1"), "x", vec![]);
    cache.put(key("new-2"), "x", vec![]);

    // Fourth write exceeded the ceiling and removed both expired entries.
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&key("new-1")).is_some());
    assert!(cache.get(&key("new-2")).is_some());
}

#[test]
fn cache_can_grow_past_ceiling_when_nothing_expired() {
    let config = CacheConfig::new().max_entries(2);
    let cache = ResponseCache::new(&config);

    for i in 0..5 {
        cache.put(key(&format!("q{i}")), "x", vec![]);
    }

    assert_eq!(cache.len(), 5);
}

// =========================================================================
// Sharing
// =========================================================================

#[test]
fn shared_across_threads() {
    let cache = Arc::new(ResponseCache::default());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                cache.put(key(&format!("q{i}")), format!("a{i}"), vec![]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 4);
    assert_eq!(cache.get(&key("q2")).unwrap().answer_text, "a2");
}
