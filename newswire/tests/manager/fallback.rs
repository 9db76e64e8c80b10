use std::sync::Arc;

use crate::helpers::{AAPL, MockProvider, explicit, manager_of, registry_of};
use newswire::{ContentType, FallbackCascade, NewsManager, NewswireError, RoutingTable};
use newswire::{ContentRequest, ContentRouter};

#[tokio::test]
async fn explicit_analysis_failure_falls_back_to_native() {
    let native = MockProvider::builder().name("native").build();
    let analysis = MockProvider::builder().name("analysis").failing(503).build();
    let sentiment = MockProvider::builder().name("sentiment").build();
    let m = manager_of(&[Arc::clone(&native), Arc::clone(&analysis), sentiment]);

    let resp = m
        .get(AAPL, &explicit("analysis", ContentType::Analysis))
        .await
        .unwrap();
    assert!(resp.successful);
    assert_eq!(resp.provider, "native");
    assert_eq!(analysis.calls(), 1, "failed provider is not retried");
    assert_eq!(native.calls(), 1);
}

#[tokio::test]
async fn cascade_never_attempts_a_provider_twice() {
    let trio = [
        MockProvider::builder().name("native").failing(500).build(),
        MockProvider::builder().name("analysis").failing(502).build(),
        MockProvider::builder().name("sentiment").failing(503).build(),
    ];
    let m = NewsManager::builder()
        .registry(registry_of(&trio))
        .fallback_chain(["native", "analysis", "sentiment", "native"])
        .build()
        .unwrap();

    let resp = m
        .get(AAPL, &explicit("sentiment", ContentType::Sentiment))
        .await
        .unwrap();
    assert!(!resp.successful);
    assert_eq!(resp.status, 500);
    for p in &trio {
        assert_eq!(p.calls(), 1, "{} attempted more than once", p.name);
    }
    let msg = resp.error_message().unwrap();
    assert!(msg.contains("all providers failed"), "{msg}");
}

#[tokio::test]
async fn fallback_disabled_returns_provider_failure() {
    let native = MockProvider::builder().name("native").build();
    let analysis = MockProvider::builder().name("analysis").failing(429).build();
    let m = manager_of(&[Arc::clone(&native), analysis]);

    let resp = m
        .get(
            AAPL,
            &explicit("analysis", ContentType::News).fallback(false),
        )
        .await
        .unwrap();
    assert!(!resp.successful);
    assert_eq!(resp.status, 429);
    assert_eq!(resp.provider, "analysis");
    assert_eq!(resp.payload["symbol"], AAPL);
    assert_eq!(resp.payload["source"], "analysis");
    assert_eq!(resp.payload["content_type"], "news");
    assert!(resp.payload["error"].is_string());
    assert_eq!(native.calls(), 0);
}

#[tokio::test]
async fn auto_requests_do_not_cascade() {
    let native = MockProvider::builder().name("native").failing(500).build();
    let analysis = MockProvider::builder().name("analysis").build();
    let m = manager_of(&[Arc::clone(&native), Arc::clone(&analysis)]);

    let resp = m
        .get(AAPL, &newswire::ContentOptions::new())
        .await
        .unwrap();
    assert!(!resp.successful);
    assert_eq!(native.calls(), 1);
    assert_eq!(analysis.calls(), 0);
}

#[tokio::test]
async fn unsupported_type_on_explicit_source_falls_back() {
    let native = MockProvider::builder()
        .name("native")
        .supports(&[ContentType::News])
        .build();
    let sentiment = MockProvider::builder().name("sentiment").build();
    let m = manager_of(&[native, Arc::clone(&sentiment)]);

    let resp = m
        .get(AAPL, &explicit("native", ContentType::Sentiment))
        .await
        .unwrap();
    assert!(resp.successful);
    assert_eq!(resp.provider, "sentiment");
}

#[tokio::test]
async fn unsuccessful_responses_are_treated_as_failures() {
    let native = MockProvider::builder().name("native").build();
    let analysis = MockProvider::builder()
        .name("analysis")
        .with_content_fn(|req| {
            Ok(newswire::CanonicalResponse::failure(
                req,
                &NewswireError::provider("analysis", Some(502), "upstream"),
            ))
        })
        .build();
    let m = manager_of(&[Arc::clone(&native), analysis]);

    let resp = m
        .get(AAPL, &explicit("analysis", ContentType::News))
        .await
        .unwrap();
    assert!(resp.successful);
    assert_eq!(resp.provider, "native");
}

#[tokio::test]
async fn exhaustion_lists_errors_in_attempt_order() {
    let trio = [
        MockProvider::builder().name("native").failing(500).build(),
        MockProvider::builder().name("analysis").failing(502).build(),
        MockProvider::builder().name("sentiment").failing(503).build(),
    ];
    let registry = Arc::new(registry_of(&trio));
    let router = ContentRouter::new(Arc::clone(&registry), RoutingTable::default());
    let cascade = FallbackCascade::new(
        registry,
        router,
        vec!["native".to_string(), "analysis".to_string()],
    );
    let req = ContentRequest::new(AAPL, explicit("native", ContentType::Sentiment)).unwrap();

    let err = cascade
        .try_with_fallback(&req, "native")
        .await
        .expect_err("everything fails");
    let NewswireError::AllProvidersFailed(errors) = err else {
        panic!("unexpected error variant");
    };
    let statuses: Vec<Option<u16>> = errors
        .iter()
        .map(|e| match e {
            NewswireError::Provider { status, .. } => *status,
            _ => None,
        })
        .collect();
    // router pick (sentiment) first, then the chain minus the excluded native
    assert_eq!(statuses, [Some(503), Some(502)]);
}
