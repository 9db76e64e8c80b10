use std::sync::Arc;

use crate::helpers::{MockProvider, registry_of};
use newswire::{HealthStatus, NewsManager, NewswireError};

#[tokio::test]
async fn every_canonical_provider_is_reported() {
    let mut registry = registry_of(&[
        MockProvider::builder().name("native").build(),
        MockProvider::builder().name("analysis").healthy(false).build(),
        MockProvider::builder()
            .name("sentiment")
            .health_error(NewswireError::Transport("refused".into()))
            .build(),
    ]);
    registry.register("broken", || {
        Err(NewswireError::Transport("no credentials".into()))
    });
    registry.register_alias("default", "native").unwrap();
    let m = NewsManager::builder().registry(registry).build().unwrap();

    let report = m.providers_health().await;
    assert_eq!(
        report.keys().collect::<Vec<_>>(),
        ["analysis", "broken", "native", "sentiment"],
        "aliases are not reported separately"
    );

    assert_eq!(report["native"].status, HealthStatus::Healthy);
    assert!(report["native"].capabilities.is_some());
    assert!(report["native"].message.is_none());

    assert_eq!(report["analysis"].status, HealthStatus::Unhealthy);

    let sentiment = &report["sentiment"];
    assert_eq!(sentiment.status, HealthStatus::Error);
    assert!(sentiment.capabilities.is_some());
    assert_eq!(
        sentiment.message.as_deref(),
        Some("health check failed for sentiment: transport error: refused")
    );

    let broken = &report["broken"];
    assert_eq!(broken.status, HealthStatus::Error);
    assert!(broken.capabilities.is_none());
    assert!(
        broken
            .message
            .as_deref()
            .is_some_and(|m| m.contains("no credentials"))
    );
}

#[tokio::test]
async fn health_check_failures_keep_their_message() {
    let m = NewsManager::builder()
        .registry(registry_of(&[MockProvider::builder()
            .name("native")
            .health_error(NewswireError::health_check_failed("native", "timeout"))
            .build()]))
        .build()
        .unwrap();
    let report = m.providers_health().await;
    assert_eq!(
        report["native"].message.as_deref(),
        Some("health check failed for native: timeout")
    );
}

#[tokio::test]
async fn health_reports_build_providers_lazily() {
    let native = MockProvider::builder().name("native").build();
    let mut registry = registry_of(&[]);
    let handle = Arc::clone(&native);
    registry.register("native", move || {
        Ok(Arc::clone(&handle) as Arc<dyn newswire::ContentProvider>)
    });
    let m = NewsManager::builder().registry(registry).build().unwrap();
    assert!(!m.registry().is_resolved("native"));
    m.providers_health().await;
    assert!(m.registry().is_resolved("native"));
    assert_eq!(native.health_calls(), 1);
}
