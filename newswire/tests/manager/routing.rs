use std::sync::Arc;

use crate::helpers::{AAPL, MockProvider, manager_of, opts, registry_of, standard_trio};
use newswire::{ContentRouter, ContentType, NewswireError, RoutingTable};

#[tokio::test]
async fn sentiment_prefers_sentiment_provider_when_healthy() {
    let m = manager_of(&standard_trio());
    assert_eq!(
        m.router().select_provider(ContentType::Sentiment).await,
        "sentiment"
    );
}

#[tokio::test]
async fn unhealthy_head_yields_next_candidate() {
    let m = manager_of(&[
        MockProvider::builder().name("native").build(),
        MockProvider::builder().name("analysis").build(),
        MockProvider::builder().name("sentiment").healthy(false).build(),
    ]);
    assert_eq!(
        m.router().select_provider(ContentType::Sentiment).await,
        "analysis"
    );
}

#[tokio::test]
async fn news_auto_with_all_healthy_goes_native() {
    let [native, analysis, sentiment] = standard_trio();
    let m = manager_of(&[Arc::clone(&native), analysis, sentiment]);
    let resp = m.get(AAPL, &opts(ContentType::News)).await.unwrap();
    assert!(resp.successful);
    assert_eq!(resp.provider, "native");
    assert_eq!(native.calls(), 1);
}

#[tokio::test]
async fn providers_lacking_the_type_are_skipped() {
    let m = manager_of(&[
        MockProvider::builder()
            .name("native")
            .supports(&[ContentType::News, ContentType::Events])
            .build(),
        MockProvider::builder()
            .name("analysis")
            .supports(&[ContentType::News])
            .build(),
        MockProvider::builder().name("sentiment").healthy(false).build(),
    ]);
    // Nobody healthy supports sentiment, so the news head is used regardless.
    assert_eq!(
        m.router().select_provider(ContentType::Sentiment).await,
        "native"
    );
}

#[tokio::test]
async fn health_check_errors_count_as_unhealthy() {
    let m = manager_of(&[
        MockProvider::builder()
            .name("analysis")
            .health_error(NewswireError::health_check_failed("analysis", "refused"))
            .build(),
        MockProvider::builder().name("native").build(),
        MockProvider::builder().name("sentiment").build(),
    ]);
    assert_eq!(
        m.router().select_provider(ContentType::Analysis).await,
        "native"
    );
}

#[tokio::test]
async fn unresolvable_candidates_are_skipped() {
    let mut registry = registry_of(&[MockProvider::builder().name("analysis").build()]);
    registry.register("native", || {
        Err(NewswireError::Transport("cannot connect".to_string()))
    });
    let router = ContentRouter::new(Arc::new(registry), RoutingTable::default());
    // native fails to build and sentiment is not registered at all.
    assert_eq!(router.select_provider(ContentType::Events).await, "analysis");
}

#[tokio::test]
async fn custom_priorities_are_honored() {
    let registry = Arc::new(registry_of(&standard_trio()));
    let routing = RoutingTable::default().with_priority(ContentType::News, &["sentiment", "native"]);
    let router = ContentRouter::new(registry, routing);
    assert_eq!(router.select_provider(ContentType::News).await, "sentiment");
    assert_eq!(router.routing().default_provider(), "sentiment");
}

#[tokio::test]
async fn nothing_healthy_falls_back_to_default_without_error() {
    let m = manager_of(&[
        MockProvider::builder().name("native").healthy(false).build(),
        MockProvider::builder().name("analysis").healthy(false).build(),
    ]);
    for ct in ContentType::ALL {
        assert_eq!(m.router().select_provider(ct).await, "native");
    }
}
