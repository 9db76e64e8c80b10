//! Newswire routes financial content requests across multiple providers.
//!
//! Overview
//! - One entry point, [`NewsManager`], serves four content types: news,
//!   analysis, sentiment and events.
//! - `auto` requests are routed by a per-type priority table to the first
//!   healthy provider that supports the type.
//! - Explicit sources that fail can cascade to alternates; each provider is
//!   tried at most once per request.
//! - Successful payloads are cached with per-type TTLs keyed by
//!   `(symbol, source, type, timeframe)`.
//! - Operational failures come back as unsuccessful responses; only caller
//!   mistakes (unknown provider, bad symbol, bad option) surface as `Err`.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use newswire::{ContentOptions, ContentType, NewsManager};
//! use newswire_providers::{HttpTransport, ProviderTransports, default_registry};
//!
//! let http = Arc::new(HttpTransport::new("https://api.example.com/v1")?);
//! let registry = default_registry(ProviderTransports::shared(http))?;
//! let manager = NewsManager::builder().registry(registry).build()?;
//!
//! let news = manager.get("AAPL", &ContentOptions::new()).await?;
//! let mood = manager
//!     .get("AAPL", &ContentOptions::new().content_type(ContentType::Sentiment))
//!     .await?;
//! let report = manager
//!     .get_from_multiple_sources("AAPL", &["native", "analysis"], &ContentOptions::new())
//!     .await?;
//! let health = manager.providers_health().await;
//! ```
//!
//! See the `demos` crate for a runnable walkthrough against fixture data.
#![warn(missing_docs)]

mod fallback;
mod manager;
mod router;

pub use fallback::{FallbackCascade, tag_err};
pub use manager::{NewsManager, NewsManagerBuilder};
pub use router::ContentRouter;

pub use newswire_cache::MokaCacheStore;
pub use newswire_core::{
    ANALYSIS, AggregateResponse, CacheConfig, CacheStore, Capabilities, CanonicalResponse,
    ContentOptions, ContentProvider, ContentRequest, ContentType, HealthStatus, Mood, NATIVE,
    NewswireConfig, NewswireError, NoopCache, ProviderHealth, ProviderRegistry, RoutingTable,
    SENTIMENT, SentimentLabel, SourcePreference,
};
