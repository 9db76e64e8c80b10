//! Configuration types shared by the manager, the router and the cache.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::ContentType;

/// Canonical name of the native market-data provider.
pub const NATIVE: &str = "native";
/// Canonical name of the AI analysis provider.
pub const ANALYSIS: &str = "analysis";
/// Canonical name of the social sentiment provider.
pub const SENTIMENT: &str = "sentiment";

/// Cache TTL and capacity settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL applied when no per-type override exists.
    pub default_ttl: Duration,
    /// Per content type TTL overrides; a zero duration disables caching for that type.
    pub per_type_ttl: HashMap<ContentType, Duration>,
    /// Upper bound on the number of cached entries.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(300),
            per_type_ttl: HashMap::new(),
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    /// Effective TTL for `content_type`, or `None` when caching is disabled for it.
    #[must_use]
    pub fn ttl_for(&self, content_type: ContentType) -> Option<Duration> {
        let ttl = self
            .per_type_ttl
            .get(&content_type)
            .copied()
            .unwrap_or(self.default_ttl);
        if ttl.is_zero() { None } else { Some(ttl) }
    }
}

/// Ordered candidate providers per content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    priorities: HashMap<ContentType, Vec<String>>,
}

impl Default for RoutingTable {
    fn default() -> Self {
        let list = |names: [&str; 3]| names.iter().map(|n| (*n).to_string()).collect::<Vec<_>>();
        let mut priorities = HashMap::new();
        priorities.insert(ContentType::News, list([NATIVE, ANALYSIS, SENTIMENT]));
        priorities.insert(ContentType::Analysis, list([ANALYSIS, NATIVE, SENTIMENT]));
        priorities.insert(ContentType::Sentiment, list([SENTIMENT, ANALYSIS, NATIVE]));
        priorities.insert(ContentType::Events, list([NATIVE, ANALYSIS, SENTIMENT]));
        Self { priorities }
    }
}

impl RoutingTable {
    /// Replace the candidate order for one content type.
    #[must_use]
    pub fn with_priority(mut self, content_type: ContentType, names: &[&str]) -> Self {
        self.priorities.insert(
            content_type,
            names.iter().map(|n| (*n).to_string()).collect(),
        );
        self
    }

    /// Candidates for `content_type`, highest priority first.
    #[must_use]
    pub fn candidates(&self, content_type: ContentType) -> &[String] {
        self.priorities
            .get(&content_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Provider chosen when no candidate qualifies: the head of the news list.
    #[must_use]
    pub fn default_provider(&self) -> &str {
        self.candidates(ContentType::News)
            .first()
            .map_or(NATIVE, String::as_str)
    }
}

/// Global configuration for the `NewsManager` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewswireConfig {
    /// Cache TTLs and capacity.
    pub cache: CacheConfig,
    /// Router priority table.
    pub routing: RoutingTable,
    /// Fixed tail of the fallback cascade, after the router's pick.
    pub fallback_chain: Vec<String>,
    /// Bound on concurrent calls in multi-source aggregation; `None` means one per source.
    pub max_concurrent_sources: Option<usize>,
}

impl Default for NewswireConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            routing: RoutingTable::default(),
            fallback_chain: vec![NATIVE.to_string(), ANALYSIS.to_string()],
            max_concurrent_sources: None,
        }
    }
}
