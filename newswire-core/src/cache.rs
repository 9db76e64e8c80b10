//! Cache collaborator contract and key derivation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use newswire_types::{ContentRequest, ContentType, NewswireError};

/// Key/value store with per-entry time-to-live.
///
/// Writes to an existing key overwrite it. Expiry is the store's job; callers
/// never delete entries.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key` for `ttl`.
    async fn put(&self, key: &str, value: Value, ttl: Duration) -> Result<(), NewswireError>;
}

/// Store that never retains anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl CacheStore for NoopCache {
    async fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn put(&self, _key: &str, _value: Value, _ttl: Duration) -> Result<(), NewswireError> {
        Ok(())
    }
}

/// Derive the cache key for a request tuple.
///
/// Free-form components are length-prefixed so distinct tuples can never
/// produce the same key, whatever characters they contain. A missing
/// sentiment filter is written as `-`, which no length prefix can start with.
#[must_use]
pub fn cache_key(
    symbol: &str,
    source: &str,
    content_type: ContentType,
    timeframe: &str,
    sentiment_filter: Option<&str>,
) -> String {
    let filter = sentiment_filter.map_or_else(|| "-".to_string(), |f| format!("{}:{f}", f.len()));
    format!(
        "newswire/{}/{}:{}/{}:{}/{}:{}/{}",
        content_type.as_str(),
        symbol.len(),
        symbol,
        source.len(),
        source,
        timeframe.len(),
        timeframe,
        filter,
    )
}

/// Cache key for a validated request.
#[must_use]
pub fn cache_key_for(req: &ContentRequest) -> String {
    cache_key(
        req.symbol(),
        req.options.source.as_str(),
        req.content_type(),
        &req.options.timeframe,
        req.options.sentiment_filter.as_deref(),
    )
}
