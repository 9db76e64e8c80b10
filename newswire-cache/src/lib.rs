//! newswire-cache
//!
//! `CacheStore` implementation on top of `moka::future::Cache` with a TTL
//! carried by each entry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use newswire_core::{CacheConfig, CacheStore, NewswireError};
use serde_json::Value;

#[derive(Clone)]
struct Entry {
    value: Arc<Value>,
    ttl: Duration,
}

/// Expiry policy reading the TTL stored alongside each value.
///
/// Overwrites restart the clock with the new entry's TTL.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded, thread-safe TTL cache.
///
/// Concurrent writers to the same key resolve as last-write-wins.
#[derive(Clone)]
pub struct MokaCacheStore {
    inner: moka::future::Cache<String, Entry>,
}

impl MokaCacheStore {
    /// Store holding at most `max_entries` values.
    #[must_use]
    pub fn new(max_entries: u64) -> Self {
        let inner = moka::future::Cache::builder()
            .max_capacity(max_entries.max(1))
            .expire_after(PerEntryTtl)
            .build();
        Self { inner }
    }

    /// Store sized from a [`CacheConfig`].
    #[must_use]
    pub fn from_config(cfg: &CacheConfig) -> Self {
        Self::new(cfg.max_entries)
    }

    /// Approximate number of live entries after pending maintenance runs.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, key: &str) -> Option<Value> {
        let hit = self.inner.get(key).await.map(|e| (*e.value).clone());
        #[cfg(feature = "tracing")]
        tracing::trace!(key, hit = hit.is_some(), "cache lookup");
        hit
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration) -> Result<(), NewswireError> {
        if ttl.is_zero() {
            return Err(NewswireError::Cache(format!("refusing zero ttl for {key}")));
        }
        self.inner
            .insert(
                key.to_string(),
                Entry {
                    value: Arc::new(value),
                    ttl,
                },
            )
            .await;
        Ok(())
    }
}
