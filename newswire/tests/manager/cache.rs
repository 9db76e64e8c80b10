use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::helpers::{AAPL, MockProvider, explicit, opts, registry_of, standard_trio};
use newswire::{
    CacheConfig, CacheStore, ContentType, MokaCacheStore, NewsManager, NewswireConfig,
    NewswireError, NoopCache,
};
use newswire_core::Transport;
use newswire_mock::MockTransport;
use newswire_providers::{ProviderTransports, default_registry};

struct BrokenCache {
    writes: AtomicUsize,
}

#[async_trait]
impl CacheStore for BrokenCache {
    async fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn put(&self, _key: &str, _value: Value, _ttl: Duration) -> Result<(), NewswireError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(NewswireError::Cache("disk full".to_string()))
    }
}

#[tokio::test]
async fn second_call_is_served_from_cache() {
    let [native, analysis, sentiment] = standard_trio();
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native), analysis, sentiment]))
        .build()
        .unwrap();

    let first = m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    assert!(first.payload.get("cached").is_none());
    let second = m.get(" aapl ", &opts(ContentType::News)).await.unwrap();
    assert!(second.successful);
    assert_eq!(second.payload["cached"], true);
    assert_eq!(second.provider, "native");
    assert_eq!(native.calls(), 1, "cache hit must not reach the provider");
}

#[tokio::test]
async fn cache_flag_off_bypasses_reads_and_writes() {
    let native = MockProvider::builder().name("native").build();
    let cache = Arc::new(MokaCacheStore::default());
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native)]))
        .cache(Arc::clone(&cache) as Arc<dyn CacheStore>)
        .build()
        .unwrap();

    let o = opts(ContentType::News).cache(false);
    m.get(AAPL, &o).await.unwrap();
    m.get(AAPL, &o).await.unwrap();
    assert_eq!(native.calls(), 2);
    assert_eq!(cache.entry_count().await, 0);
}

#[tokio::test]
async fn zero_ttl_disables_caching_for_that_type() {
    let native = MockProvider::builder().name("native").build();
    let mut cfg = NewswireConfig::default();
    cfg.cache = CacheConfig {
        per_type_ttl: [(ContentType::Events, Duration::ZERO)].into_iter().collect(),
        ..CacheConfig::default()
    };
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native)]))
        .config(cfg)
        .build()
        .unwrap();

    m.get(AAPL, &opts(ContentType::Events)).await.unwrap();
    m.get(AAPL, &opts(ContentType::Events)).await.unwrap();
    assert_eq!(native.calls(), 2);

    m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    assert_eq!(native.calls(), 3);
}

#[tokio::test]
async fn key_components_are_distinct_entries() {
    let native = MockProvider::builder().name("native").build();
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native)]))
        .build()
        .unwrap();

    m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    m.get(AAPL, &opts(ContentType::News).timeframe("7d")).await.unwrap();
    m.get("MSFT", &opts(ContentType::News)).await.unwrap();
    m.get(AAPL, &explicit("native", ContentType::News)).await.unwrap();
    assert_eq!(native.calls(), 4);
}

#[tokio::test]
async fn failed_cache_writes_do_not_fail_the_call() {
    let cache = Arc::new(BrokenCache {
        writes: AtomicUsize::new(0),
    });
    let m = NewsManager::builder()
        .registry(registry_of(&standard_trio()))
        .cache(Arc::clone(&cache) as Arc<dyn CacheStore>)
        .build()
        .unwrap();

    let resp = m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    assert!(resp.successful);
    assert_eq!(cache.writes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failures_are_never_cached() {
    let native = MockProvider::builder().name("native").failing(503).build();
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native)]))
        .build()
        .unwrap();

    let o = explicit("native", ContentType::News).fallback(false);
    assert!(!m.get(AAPL, &o).await.unwrap().successful);
    assert!(!m.get(AAPL, &o).await.unwrap().successful);
    assert_eq!(native.calls(), 2);
}

#[tokio::test]
async fn cascade_success_is_cached_under_the_request_key() {
    let native = MockProvider::builder().name("native").build();
    let analysis = MockProvider::builder().name("analysis").failing(500).build();
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native), Arc::clone(&analysis)]))
        .build()
        .unwrap();

    let o = explicit("analysis", ContentType::Analysis);
    let first = m.get(AAPL, &o).await.unwrap();
    assert_eq!(first.provider, "native");
    let second = m.get(AAPL, &o).await.unwrap();
    assert_eq!(second.payload["cached"], true);
    assert_eq!(second.provider, "native");
    assert_eq!(analysis.calls(), 1);
    assert_eq!(native.calls(), 1);
}

#[tokio::test]
async fn noop_cache_always_misses() {
    let native = MockProvider::builder().name("native").build();
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native)]))
        .cache(Arc::new(NoopCache))
        .build()
        .unwrap();
    m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    assert_eq!(native.calls(), 2);
}

#[tokio::test]
async fn entries_expire_after_ttl() {
    let native = MockProvider::builder().name("native").build();
    let mut cfg = NewswireConfig::default();
    cfg.cache.default_ttl = Duration::from_millis(100);
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native)]))
        .config(cfg)
        .build()
        .unwrap();

    m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    assert_eq!(native.calls(), 1);
    tokio::time::sleep(Duration::from_millis(250)).await;
    m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    assert_eq!(native.calls(), 2);
}

#[tokio::test]
async fn sentiment_filter_is_part_of_the_key() {
    let transport: Arc<dyn Transport> = Arc::new(MockTransport::new());
    let m = NewsManager::builder()
        .registry(default_registry(ProviderTransports::shared(transport)).unwrap())
        .build()
        .unwrap();
    let social = explicit("sentiment", ContentType::News);

    let filtered = m
        .get(AAPL, &social.clone().sentiment_filter("negative"))
        .await
        .unwrap();
    let unfiltered = m.get(AAPL, &social).await.unwrap();
    assert!(unfiltered.payload.get("cached").is_none());
    assert_eq!(filtered.payload["count"], 2);
    assert_eq!(unfiltered.payload["count"], 7);

    let filtered_again = m
        .get(AAPL, &social.sentiment_filter("negative"))
        .await
        .unwrap();
    assert_eq!(filtered_again.payload["cached"], true);
    assert_eq!(filtered_again.payload["count"], 2);
}
