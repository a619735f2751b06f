// tests/factcheck_aggregator.rs
//
// Aggregator behavior with static providers:
// - partial / error status policy
// - cache MISS → HIT with identical payload, development-mode bypass
// - error results are never cached
// - timeouts and out-of-order completion
// - concurrent calls for the same claim converge on one cached value

use std::sync::Arc;
use std::time::Duration;

use credibility_engine::error::ProviderError;
use credibility_engine::factcheck::{
    AggregatorConfig, FactCheckAggregator, FactCheckCache, FactCheckProvider, InMemoryCache,
    ProviderPayload, StaticProvider,
};
use credibility_engine::types::{
    claim_key, ClaimBusterScore, FactCheckEntry, FactCheckStatus, RecordStatus,
};

fn records(tag: &str) -> ProviderPayload {
    ProviderPayload::Records(vec![FactCheckEntry::Raw(tag.to_string())])
}

fn aggregator(
    providers: Vec<Arc<dyn FactCheckProvider>>,
    cache: Arc<InMemoryCache>,
    development_mode: bool,
) -> FactCheckAggregator {
    FactCheckAggregator::new(
        providers,
        cache,
        AggregatorConfig {
            provider_timeout: Duration::from_millis(500),
            development_mode,
        },
    )
}

fn unique_claim(tag: &str) -> String {
    format!("[{tag}] {}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
async fn one_failing_one_ok_is_partial() {
    let agg = aggregator(
        vec![
            Arc::new(StaticProvider::failing("broken", ProviderError::Request("503".into()))),
            Arc::new(StaticProvider::ok("google_fact_check", records("ok"))),
        ],
        Arc::new(InMemoryCache::new()),
        false,
    );

    let r = agg.check("claim", Some("req")).await;
    assert_eq!(r.status, FactCheckStatus::Partial);
    assert_eq!(r.errors.len(), 1);
    assert_eq!(r.errors[0].service, "broken");
    assert!(r.errors[0].error.contains("503"));
    assert_eq!(r.google_fact_check.len(), 1);
    assert_eq!(r.request_id, "req");
    assert!(!r.cached);
}

#[tokio::test]
async fn only_errors_is_error_and_not_cached() {
    let cache = Arc::new(InMemoryCache::new());
    let agg = aggregator(
        vec![Arc::new(StaticProvider::failing(
            "broken",
            ProviderError::Request("down".into()),
        ))],
        Arc::clone(&cache),
        false,
    );

    let r = agg.check("claim", None).await;
    assert_eq!(r.status, FactCheckStatus::Error);
    assert_eq!(r.errors.len(), 1);
    assert!(r.message.is_some());
    assert!(r.ensure_usable().is_err());
    assert!(cache.is_empty());

    // still a miss next time
    let again = agg.check("claim", None).await;
    assert!(!again.cached);
}

#[tokio::test]
async fn second_identical_claim_is_cached_with_identical_payload() {
    let cache = Arc::new(InMemoryCache::new());
    let agg = aggregator(
        vec![
            Arc::new(StaticProvider::ok("google_fact_check", records("r1"))),
            Arc::new(StaticProvider::ok(
                "claim_buster",
                ProviderPayload::ClaimBuster(ClaimBusterScore {
                    score: 0.75,
                    explanation: String::new(),
                    status: RecordStatus::Placeholder,
                }),
            )),
        ],
        Arc::clone(&cache),
        false,
    );
    let claim = unique_claim("cache");

    let first = agg.check(&claim, None).await;
    let second = agg.check(&claim, None).await;

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.status, FactCheckStatus::Success);

    let mut second_uncached = second.clone();
    second_uncached.cached = false;
    assert_eq!(first, second_uncached);
    assert!(cache.get(&claim_key(&claim)).is_some());
}

#[tokio::test]
async fn development_mode_bypasses_cache() {
    let cache = Arc::new(InMemoryCache::new());
    let agg = aggregator(
        vec![Arc::new(StaticProvider::ok("google_fact_check", records("r")))],
        Arc::clone(&cache),
        true,
    );

    let first = agg.check("dev claim", None).await;
    let second = agg.check("dev claim", None).await;
    assert!(!first.cached);
    assert!(!second.cached);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn cache_key_ignores_request_id() {
    let agg = aggregator(
        vec![Arc::new(StaticProvider::ok("google_fact_check", records("r")))],
        Arc::new(InMemoryCache::new()),
        false,
    );
    let first = agg.check("same text", Some("a")).await;
    let second = agg.check("same text", Some("b")).await;
    assert!(second.cached);
    // The cached payload is returned as stored.
    assert_eq!(second.request_id, first.request_id);
}

#[tokio::test]
async fn slow_provider_times_out_without_blocking_others() {
    let agg = aggregator(
        vec![
            Arc::new(
                StaticProvider::ok("slow", records("late")).with_delay(Duration::from_secs(5)),
            ),
            Arc::new(StaticProvider::ok("fast", records("early"))),
        ],
        Arc::new(InMemoryCache::new()),
        true,
    );

    let started = std::time::Instant::now();
    let r = agg.check("claim", None).await;
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(r.status, FactCheckStatus::Partial);
    assert_eq!(r.errors.len(), 1);
    assert_eq!(r.errors[0].service, "slow");
    assert!(r.errors[0].error.contains("timed out"));
    assert_eq!(r.google_fact_check, vec![FactCheckEntry::Raw("early".into())]);
}

#[tokio::test]
async fn request_deadline_caps_provider_timeout() {
    let agg = aggregator(
        vec![Arc::new(
            StaticProvider::ok("slow", records("late")).with_delay(Duration::from_millis(300)),
        )],
        Arc::new(InMemoryCache::new()),
        true,
    );
    let r = agg
        .check_with_deadline("claim", None, Some(Duration::from_millis(50)))
        .await;
    assert_eq!(r.status, FactCheckStatus::Error);
    assert!(r.errors[0].error.contains("50 ms"));
}

#[tokio::test]
async fn merge_order_follows_provider_order_not_completion_order() {
    let agg = aggregator(
        vec![
            Arc::new(
                StaticProvider::ok("first", records("first"))
                    .with_delay(Duration::from_millis(100)),
            ),
            Arc::new(StaticProvider::ok("second", records("second"))),
        ],
        Arc::new(InMemoryCache::new()),
        true,
    );
    let r = agg.check("claim", None).await;
    assert_eq!(
        r.google_fact_check,
        vec![
            FactCheckEntry::Raw("first".into()),
            FactCheckEntry::Raw("second".into())
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_same_claim_converges_on_one_cached_value() {
    let cache = Arc::new(InMemoryCache::new());
    let agg = Arc::new(aggregator(
        vec![Arc::new(
            StaticProvider::ok("google_fact_check", records("r"))
                .with_delay(Duration::from_millis(20)),
        )],
        Arc::clone(&cache),
        false,
    ));
    let claim = unique_claim("concurrent");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let agg = Arc::clone(&agg);
        let claim = claim.clone();
        handles.push(tokio::spawn(async move { agg.check(&claim, None).await }));
    }
    let mut ids = Vec::new();
    for h in handles {
        ids.push(h.await.unwrap().request_id);
    }

    assert_eq!(cache.len(), 1);
    let stored = cache.get(&claim_key(&claim)).unwrap().request_id;
    assert!(ids.iter().all(|id| *id == stored));
}
