use std::sync::Arc;

use newswire_core::{ContentType, ProviderRegistry, RoutingTable};

/// Picks a provider for a content type from the priority table.
#[derive(Clone)]
pub struct ContentRouter {
    registry: Arc<ProviderRegistry>,
    routing: RoutingTable,
}

impl ContentRouter {
    /// Create a router over `registry` using `routing` priorities.
    #[must_use]
    pub const fn new(registry: Arc<ProviderRegistry>, routing: RoutingTable) -> Self {
        Self { registry, routing }
    }

    /// Priority table in use.
    #[must_use]
    pub const fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    /// First candidate that supports `content_type` and reports healthy.
    ///
    /// Candidates that cannot be resolved are skipped and a failing health
    /// probe counts as unhealthy. When nothing qualifies the table's default
    /// provider is returned regardless of its health, so this never fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "newswire::router::select_provider",
            skip(self),
            fields(content_type = %content_type),
        )
    )]
    pub async fn select_provider(&self, content_type: ContentType) -> String {
        for name in self.routing.candidates(content_type) {
            let Ok(provider) = self.registry.resolve(name).await else {
                continue;
            };
            if !provider.supports(content_type) {
                continue;
            }
            match provider.is_healthy().await {
                Ok(true) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(provider = %name, "selected");
                    return name.clone();
                }
                Ok(false) | Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(provider = %name, "skipping unhealthy provider");
                }
            }
        }
        let fallback = self.routing.default_provider().to_string();
        #[cfg(feature = "tracing")]
        tracing::warn!(provider = %fallback, "no healthy candidate, using default provider");
        fallback
    }
}
