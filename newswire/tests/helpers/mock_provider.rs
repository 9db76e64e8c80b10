#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use newswire::{
    Capabilities, CanonicalResponse, ContentProvider, ContentRequest, ContentType, NewswireError,
};
use serde_json::json;
use tokio::time::{Duration, sleep};

pub type ContentFn =
    Arc<dyn Fn(&ContentRequest) -> Result<CanonicalResponse, NewswireError> + Send + Sync>;

/// Tracks how many calls are running at once across providers.
#[derive(Default)]
pub struct Gauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl Gauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// In-memory provider used by integration tests.
/// Behavior is tailored per test through the builder.
pub struct MockProvider {
    pub name: &'static str,
    pub types: Vec<ContentType>,
    pub healthy: bool,
    pub health_error: Option<NewswireError>,
    pub delay_ms: u64,
    pub content_fn: Option<ContentFn>,
    pub gauge: Option<Arc<Gauge>>,
    calls: AtomicUsize,
    health_calls: AtomicUsize,
}

impl MockProvider {
    pub fn builder() -> MockProviderBuilder {
        MockProviderBuilder::default()
    }

    /// Content calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    async fn serve(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(g) = &self.gauge {
            g.enter();
        }
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(g) = &self.gauge {
            g.exit();
        }
        match &self.content_fn {
            Some(f) => f(req),
            None => Ok(CanonicalResponse::ok(
                self.name,
                200,
                json!({
                    "symbol": req.symbol(),
                    "provider": self.name,
                    "content_type": req.content_type().as_str(),
                    "timeframe": req.options.timeframe,
                }),
            )),
        }
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            content_types: self.types.clone(),
            max_limit: 100,
            timeframes: vec!["1d".to_string()],
            real_time: false,
            description: format!("mock provider {}", self.name),
        }
    }

    async fn is_healthy(&self) -> Result<bool, NewswireError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        match &self.health_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.healthy),
        }
    }

    async fn news(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        self.serve(req).await
    }

    async fn analysis(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        self.serve(req).await
    }

    async fn sentiment(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        self.serve(req).await
    }

    async fn events(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        self.serve(req).await
    }
}

pub struct MockProviderBuilder {
    name: &'static str,
    types: Vec<ContentType>,
    healthy: bool,
    health_error: Option<NewswireError>,
    delay_ms: u64,
    content_fn: Option<ContentFn>,
    gauge: Option<Arc<Gauge>>,
}

impl Default for MockProviderBuilder {
    fn default() -> Self {
        Self {
            name: "mock",
            types: ContentType::ALL.to_vec(),
            healthy: true,
            health_error: None,
            delay_ms: 0,
            content_fn: None,
            gauge: None,
        }
    }
}

impl MockProviderBuilder {
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn supports(mut self, types: &[ContentType]) -> Self {
        self.types = types.to_vec();
        self
    }

    pub fn healthy(mut self, yes: bool) -> Self {
        self.healthy = yes;
        self
    }

    pub fn health_error(mut self, e: NewswireError) -> Self {
        self.health_error = Some(e);
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn gauge(mut self, gauge: Arc<Gauge>) -> Self {
        self.gauge = Some(gauge);
        self
    }

    pub fn with_content_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ContentRequest) -> Result<CanonicalResponse, NewswireError> + Send + Sync + 'static,
    {
        self.content_fn = Some(Arc::new(f));
        self
    }

    /// Every content call fails with `status` from this provider.
    pub fn failing(self, status: u16) -> Self {
        let name = self.name;
        self.with_content_fn(move |_| {
            Err(NewswireError::provider(name, Some(status), "backend exploded"))
        })
    }

    pub fn build(self) -> Arc<MockProvider> {
        Arc::new(MockProvider {
            name: self.name,
            types: self.types,
            healthy: self.healthy,
            health_error: self.health_error,
            delay_ms: self.delay_ms,
            content_fn: self.content_fn,
            gauge: self.gauge,
            calls: AtomicUsize::new(0),
            health_calls: AtomicUsize::new(0),
        })
    }
}
