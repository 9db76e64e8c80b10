use std::collections::HashSet;
use std::sync::Arc;

use newswire_core::{CanonicalResponse, ContentRequest, NewswireError, ProviderRegistry, dispatch};

use crate::router::ContentRouter;

/// Attach provider context to errors that do not carry it.
///
/// Errors already naming a provider (or aggregating several) pass through
/// untouched; configuration errors are never rewritten.
#[must_use]
pub fn tag_err(provider: &str, e: NewswireError) -> NewswireError {
    match e {
        NewswireError::Transport(msg) | NewswireError::Data(msg) => {
            NewswireError::provider(provider, None, msg)
        }
        other => other,
    }
}

/// Retries a failed request on alternate providers, each at most once.
#[derive(Clone)]
pub struct FallbackCascade {
    registry: Arc<ProviderRegistry>,
    router: ContentRouter,
    chain: Vec<String>,
}

impl FallbackCascade {
    /// Create a cascade that tries the router's pick, then `chain` in order.
    #[must_use]
    pub const fn new(
        registry: Arc<ProviderRegistry>,
        router: ContentRouter,
        chain: Vec<String>,
    ) -> Self {
        Self {
            registry,
            router,
            chain,
        }
    }

    /// Ordered, deduplicated candidate names after `best`, minus `exclude`.
    ///
    /// Names are compared by canonical name so an alias never re-runs a
    /// provider that was already tried under its real name.
    #[must_use]
    pub fn candidates(&self, best: &str, exclude: &str) -> Vec<String> {
        let canonical = |n: &str| self.registry.canonical_name(n).unwrap_or(n).to_string();
        let mut tried: HashSet<String> = HashSet::from([canonical(exclude)]);
        std::iter::once(best)
            .chain(self.chain.iter().map(String::as_str))
            .map(canonical)
            .filter(|n| tried.insert(n.clone()))
            .collect()
    }

    /// Try alternates for `req` after `exclude` has already failed.
    ///
    /// # Errors
    /// Returns `AllProvidersFailed` with one error per attempted provider, in
    /// attempt order, when no alternate succeeds.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "newswire::fallback::try_with_fallback",
            skip(self, req),
            fields(symbol = %req.symbol(), content_type = %req.content_type()),
        )
    )]
    pub async fn try_with_fallback(
        &self,
        req: &ContentRequest,
        exclude: &str,
    ) -> Result<CanonicalResponse, NewswireError> {
        let best = self.router.select_provider(req.content_type()).await;
        let mut errors: Vec<NewswireError> = Vec::new();

        for name in self.candidates(&best, exclude) {
            #[cfg(feature = "tracing")]
            tracing::debug!(provider = %name, "fallback attempt");
            let provider = match self.registry.resolve(&name).await {
                Ok(p) => p,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };
            match dispatch(provider.as_ref(), &req.pinned_to(&name)).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(provider = %name, error = %e, "fallback attempt failed");
                    errors.push(tag_err(&name, e));
                }
            }
        }

        Err(NewswireError::AllProvidersFailed(errors))
    }
}
