use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde_json::Value;

use newswire_cache::MokaCacheStore;
use newswire_core::{
    AggregateResponse, CacheStore, CanonicalResponse, ContentOptions, ContentRequest,
    HealthStatus, NewswireConfig, NewswireError, ProviderHealth, ProviderRegistry, RoutingTable,
    cache_key_for, dispatch, normalize_symbol,
};

use crate::fallback::{FallbackCascade, tag_err};
use crate::router::ContentRouter;

/// Entry point: routes content requests, caches results and falls back on failure.
pub struct NewsManager {
    registry: Arc<ProviderRegistry>,
    router: ContentRouter,
    cascade: FallbackCascade,
    cache: Arc<dyn CacheStore>,
    cfg: NewswireConfig,
}

/// Builder for constructing a [`NewsManager`].
pub struct NewsManagerBuilder {
    registry: Option<Arc<ProviderRegistry>>,
    cache: Option<Arc<dyn CacheStore>>,
    cfg: NewswireConfig,
}

impl Default for NewsManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsManagerBuilder {
    /// Create a builder with default configuration and no registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: None,
            cache: None,
            cfg: NewswireConfig::default(),
        }
    }

    /// Use `registry` for provider lookup.
    #[must_use]
    pub fn registry(mut self, registry: impl Into<Arc<ProviderRegistry>>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Use a specific cache store instead of the default in-memory one.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: NewswireConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replace only the router priority table.
    #[must_use]
    pub fn routing(mut self, routing: RoutingTable) -> Self {
        self.cfg.routing = routing;
        self
    }

    /// Set the fixed tail of the fallback cascade.
    #[must_use]
    pub fn fallback_chain<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.fallback_chain = names.into_iter().map(Into::into).collect();
        self
    }

    /// Bound concurrent calls in [`NewsManager::get_from_multiple_sources`].
    #[must_use]
    pub const fn max_concurrent_sources(mut self, n: usize) -> Self {
        self.cfg.max_concurrent_sources = Some(n);
        self
    }

    /// Build the manager.
    ///
    /// Without an explicit cache a [`MokaCacheStore`] sized from the cache
    /// configuration is used.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no registry was supplied or it holds no provider.
    pub fn build(self) -> Result<NewsManager, NewswireError> {
        let registry = self
            .registry
            .filter(|r| !r.is_empty())
            .ok_or_else(|| {
                NewswireError::InvalidArg(
                    "no providers registered; supply a populated registry via registry(...)"
                        .to_string(),
                )
            })?;
        if self.cfg.max_concurrent_sources == Some(0) {
            return Err(NewswireError::InvalidArg(
                "max_concurrent_sources must be at least 1".to_string(),
            ));
        }
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(MokaCacheStore::from_config(&self.cfg.cache)));
        let router = ContentRouter::new(Arc::clone(&registry), self.cfg.routing.clone());
        let cascade = FallbackCascade::new(
            Arc::clone(&registry),
            router.clone(),
            self.cfg.fallback_chain.clone(),
        );
        Ok(NewsManager {
            registry,
            router,
            cascade,
            cache,
            cfg: self.cfg,
        })
    }
}

impl NewsManager {
    /// Start building a new `NewsManager`.
    #[must_use]
    pub fn builder() -> NewsManagerBuilder {
        NewsManagerBuilder::new()
    }

    /// Registry the manager resolves providers from.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Router used for `auto` requests.
    #[must_use]
    pub const fn router(&self) -> &ContentRouter {
        &self.router
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &NewswireConfig {
        &self.cfg
    }

    /// Fetch content for `symbol`.
    ///
    /// Operational failures come back as an unsuccessful [`CanonicalResponse`];
    /// only caller mistakes are returned as `Err`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty symbol or a malformed option, and
    /// `ProviderNotRegistered` when an explicit source is unknown.
    pub async fn get(
        &self,
        symbol: &str,
        options: &ContentOptions,
    ) -> Result<CanonicalResponse, NewswireError> {
        let req = ContentRequest::new(symbol, options.clone())?;
        self.get_with_request(&req).await
    }

    /// Same as [`NewsManager::get`] for an already validated request.
    ///
    /// # Errors
    /// See [`NewsManager::get`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "newswire::manager::get",
            skip(self, req),
            fields(
                symbol = %req.symbol(),
                source = %req.options.source.as_str(),
                content_type = %req.content_type(),
            ),
        )
    )]
    pub async fn get_with_request(
        &self,
        req: &ContentRequest,
    ) -> Result<CanonicalResponse, NewswireError> {
        let key = cache_key_for(req);
        if req.options.cache
            && let Some(payload) = self.cache.get(&key).await
            && self.cached_payload_allowed(req, &payload)
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %key, "cache hit");
            return Ok(cached_response(req, payload));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(key = %key, "cache miss");

        let name = if req.options.source.is_auto() {
            self.router.select_provider(req.content_type()).await
        } else {
            let name = req.options.source.as_str();
            if !self.registry.contains(name) {
                return Err(NewswireError::not_registered(name));
            }
            name.to_string()
        };

        let outcome = match self.registry.resolve(&name).await {
            Ok(provider) => dispatch(provider.as_ref(), req)
                .await
                .map_err(|e| tag_err(&name, e)),
            Err(e) => Err(e),
        };

        let err = match outcome {
            Ok(resp) => {
                self.store(req, &key, &resp).await;
                return Ok(resp);
            }
            Err(e) if e.is_configuration() => return Err(e),
            Err(e) => e,
        };

        if !(req.options.fallback && !req.options.source.is_auto()) {
            return Ok(CanonicalResponse::failure(req, &err));
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(provider = %name, error = %err, "primary provider failed, falling back");
        match self.cascade.try_with_fallback(req, &name).await {
            Ok(resp) => {
                self.store(req, &key, &resp).await;
                Ok(resp)
            }
            Err(all) => {
                let mut attempts = vec![err];
                attempts.extend(all.flatten());
                Ok(CanonicalResponse::failure(
                    req,
                    &NewswireError::AllProvidersFailed(attempts),
                ))
            }
        }
    }

    /// A payload cached from a cascade is only served to requests that would
    /// themselves fall back; pinned requests need their own provider's data.
    fn cached_payload_allowed(&self, req: &ContentRequest, payload: &Value) -> bool {
        if req.options.fallback || req.options.source.is_auto() {
            return true;
        }
        let requested = req.options.source.as_str();
        let wanted = self
            .registry
            .canonical_name(requested)
            .unwrap_or(requested);
        let served = payload.get("provider").and_then(Value::as_str);
        let allowed = served.is_none_or(|p| p == wanted);
        if !allowed {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                requested = %wanted,
                served = ?served,
                "ignoring cascade entry for pinned request"
            );
        }
        allowed
    }

    async fn store(&self, req: &ContentRequest, key: &str, resp: &CanonicalResponse) {
        if !req.options.cache {
            return;
        }
        let Some(ttl) = self.cfg.cache.ttl_for(req.content_type()) else {
            return;
        };
        if let Err(_e) = self.cache.put(key, resp.payload.clone(), ttl).await {
            #[cfg(feature = "tracing")]
            tracing::warn!(key = %key, error = %_e, "cache write failed");
        }
    }

    /// Query several explicit sources for the same content, without fallback.
    ///
    /// Sources are deduplicated in order and called concurrently, at most
    /// `max_concurrent_sources` at a time. One source failing never stops the others.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty symbol.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "newswire::manager::get_from_multiple_sources",
            skip(self, sources, options),
        )
    )]
    pub async fn get_from_multiple_sources<S: AsRef<str>>(
        &self,
        symbol: &str,
        sources: &[S],
        options: &ContentOptions,
    ) -> Result<AggregateResponse, NewswireError> {
        let symbol = normalize_symbol(symbol)?;
        let mut seen = HashSet::new();
        let sources: Vec<String> = sources
            .iter()
            .map(|s| s.as_ref().to_string())
            .filter(|s| seen.insert(s.clone()))
            .collect();
        let limit = self
            .cfg
            .max_concurrent_sources
            .unwrap_or(sources.len())
            .max(1);

        let outcomes: Vec<(String, Result<CanonicalResponse, NewswireError>)> =
            stream::iter(sources.iter().cloned())
                .map(|name| {
                    let opts = options.clone().source(name.as_str()).fallback(false);
                    let symbol = symbol.as_str();
                    async move {
                        let out = self.get(symbol, &opts).await;
                        (name, out)
                    }
                })
                .buffered(limit)
                .collect()
                .await;

        let mut results = BTreeMap::new();
        let mut errors = BTreeMap::new();
        for (name, out) in outcomes {
            match out {
                Ok(resp) if resp.successful => {
                    results.insert(name, resp.payload);
                }
                Ok(resp) => {
                    let msg = resp
                        .error_message()
                        .map_or_else(|| format!("status {}", resp.status), str::to_string);
                    errors.insert(name, msg);
                }
                Err(e) => {
                    errors.insert(name, e.to_string());
                }
            }
        }

        Ok(AggregateResponse {
            symbol,
            success_count: results.len(),
            total_sources: sources.len(),
            sources,
            results,
            errors,
        })
    }

    /// Probe every registered provider.
    ///
    /// Aliases are not reported separately. A provider that cannot be built or
    /// probed is reported with `status = error`; it never hides other reports.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "newswire::manager::providers_health", skip(self))
    )]
    pub async fn providers_health(&self) -> BTreeMap<String, ProviderHealth> {
        let probes = self.registry.canonical_names().into_iter().map(|name| async move {
            let report = self.probe(&name).await;
            (name, report)
        });
        futures::future::join_all(probes).await.into_iter().collect()
    }

    async fn probe(&self, name: &str) -> ProviderHealth {
        let provider = match self.registry.resolve(name).await {
            Ok(p) => p,
            Err(e) => return error_health(name, None, e),
        };
        let capabilities = Some(provider.capabilities());
        match provider.is_healthy().await {
            Ok(healthy) => ProviderHealth {
                name: name.to_string(),
                status: if healthy {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Unhealthy
                },
                capabilities,
                message: None,
            },
            Err(e) => error_health(name, capabilities, e),
        }
    }
}

fn error_health(
    name: &str,
    capabilities: Option<newswire_core::Capabilities>,
    e: NewswireError,
) -> ProviderHealth {
    let e = match e {
        e @ NewswireError::ProviderHealthCheckFailed { .. } => e,
        other => NewswireError::health_check_failed(name, other.to_string()),
    };
    ProviderHealth {
        name: name.to_string(),
        status: HealthStatus::Error,
        capabilities,
        message: Some(e.to_string()),
    }
}

fn cached_response(req: &ContentRequest, mut payload: Value) -> CanonicalResponse {
    let provider = payload
        .get("provider")
        .and_then(Value::as_str)
        .map_or_else(|| req.options.source.as_str().to_string(), str::to_string);
    if let Some(obj) = payload.as_object_mut() {
        obj.insert("cached".to_string(), Value::Bool(true));
    }
    CanonicalResponse::ok(provider, 200, payload)
}
