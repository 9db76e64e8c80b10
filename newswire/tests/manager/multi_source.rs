use std::sync::Arc;

use crate::helpers::{AAPL, Gauge, MockProvider, explicit, opts, registry_of};
use newswire::{ContentOptions, ContentType, NewsManager, NewswireError};

fn abc(gauge: Option<Arc<Gauge>>, delay_ms: u64) -> [Arc<MockProvider>; 3] {
    let mk = |name: &'static str, fail: bool| {
        let mut b = MockProvider::builder().name(name).delay_ms(delay_ms);
        if let Some(g) = &gauge {
            b = b.gauge(Arc::clone(g));
        }
        (if fail { b.failing(500) } else { b }).build()
    };
    [mk("a", false), mk("b", true), mk("c", false)]
}

#[tokio::test]
async fn one_failing_source_does_not_hide_the_others() {
    let [a, b, c] = abc(None, 0);
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&a), Arc::clone(&b), Arc::clone(&c)]))
        .build()
        .unwrap();

    let report = m
        .get_from_multiple_sources(AAPL, &["a", "b", "c"], &opts(ContentType::News))
        .await
        .unwrap();
    assert_eq!(report.symbol, AAPL);
    assert_eq!(report.success_count, 2);
    assert_eq!(report.total_sources, 3);
    assert_eq!(report.results.keys().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(report.errors.keys().collect::<Vec<_>>(), ["b"]);
    assert!(report.errors["b"].contains("backend exploded"));
    assert_eq!(report.results["a"]["provider"], "a");
    assert_eq!(b.calls(), 1, "no fallback inside multi-source calls");
}

#[tokio::test]
async fn duplicate_sources_are_called_once() {
    let [a, b, c] = abc(None, 0);
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&a), b, c]))
        .build()
        .unwrap();

    let report = m
        .get_from_multiple_sources(
            AAPL,
            &["a", "a", "c", "a"],
            &opts(ContentType::News).cache(false),
        )
        .await
        .unwrap();
    assert_eq!(report.sources, ["a", "c"]);
    assert_eq!(report.total_sources, 2);
    assert_eq!(a.calls(), 1);
}

#[tokio::test]
async fn unknown_sources_are_reported_as_errors() {
    let [a, b, c] = abc(None, 0);
    let m = NewsManager::builder()
        .registry(registry_of(&[a, b, c]))
        .build()
        .unwrap();

    let report = m
        .get_from_multiple_sources(AAPL, &["a", "ghost"], &ContentOptions::new())
        .await
        .unwrap();
    assert_eq!(report.success_count, 1);
    assert_eq!(
        report.errors["ghost"],
        NewswireError::not_registered("ghost").to_string()
    );
}

#[tokio::test]
async fn fan_out_is_bounded() {
    let gauge = Arc::new(Gauge::default());
    let [a, b, c] = abc(Some(Arc::clone(&gauge)), 30);
    let m = NewsManager::builder()
        .registry(registry_of(&[a, b, c]))
        .max_concurrent_sources(1)
        .build()
        .unwrap();

    let report = m
        .get_from_multiple_sources(AAPL, &["a", "b", "c"], &opts(ContentType::News))
        .await
        .unwrap();
    assert_eq!(report.success_count, 2);
    assert_eq!(gauge.peak(), 1);
}

#[tokio::test]
async fn sources_run_concurrently_by_default() {
    let gauge = Arc::new(Gauge::default());
    let [a, b, c] = abc(Some(Arc::clone(&gauge)), 50);
    let m = NewsManager::builder()
        .registry(registry_of(&[a, b, c]))
        .build()
        .unwrap();

    m.get_from_multiple_sources(AAPL, &["a", "b", "c"], &opts(ContentType::News))
        .await
        .unwrap();
    assert!(gauge.peak() > 1, "peak was {}", gauge.peak());
}

#[tokio::test]
async fn empty_symbol_is_rejected() {
    let [a, b, c] = abc(None, 0);
    let m = NewsManager::builder()
        .registry(registry_of(&[a, b, c]))
        .build()
        .unwrap();
    let err = m
        .get_from_multiple_sources("  ", &["a"], &ContentOptions::new())
        .await
        .expect_err("empty symbol");
    assert!(matches!(err, NewswireError::InvalidArg(_)));
}

#[tokio::test]
async fn cascade_results_are_not_reported_for_the_failed_source() {
    let native = MockProvider::builder().name("native").build();
    let analysis = MockProvider::builder().name("analysis").failing(500).build();
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native), Arc::clone(&analysis)]))
        .build()
        .unwrap();

    let fell_back = m
        .get(AAPL, &explicit("analysis", ContentType::News))
        .await
        .unwrap();
    assert_eq!(fell_back.provider, "native");

    let report = m
        .get_from_multiple_sources(AAPL, &["analysis"], &opts(ContentType::News))
        .await
        .unwrap();
    assert_eq!(report.success_count, 0);
    assert!(report.results.is_empty(), "{:?}", report.results);
    assert!(report.errors["analysis"].contains("backend exploded"));
    assert_eq!(analysis.calls(), 2, "pinned call must reach the provider");

    let again = m
        .get(AAPL, &explicit("analysis", ContentType::News))
        .await
        .unwrap();
    assert_eq!(again.payload["cached"], true, "fallback requests still hit");
    assert_eq!(analysis.calls(), 2);
}

#[tokio::test]
async fn pinned_requests_still_hit_their_own_entries() {
    let native = MockProvider::builder().name("native").build();
    let m = NewsManager::builder()
        .registry(registry_of(&[Arc::clone(&native)]))
        .build()
        .unwrap();

    let o = opts(ContentType::News);
    m.get_from_multiple_sources(AAPL, &["native"], &o).await.unwrap();
    let report = m.get_from_multiple_sources(AAPL, &["native"], &o).await.unwrap();
    assert_eq!(report.results["native"]["cached"], true);
    assert_eq!(native.calls(), 1);
}
