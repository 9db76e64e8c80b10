//! newswire-providers
//!
//! Concrete content providers for the newswire router:
//!
//! - [`NativeProvider`]: exchange headlines, headline analysis and keyword-classified events.
//! - [`AnalysisProvider`]: model-generated news summaries, outlooks and sentiment.
//! - [`SentimentProvider`]: paginated social posts scored into mood, trend and key posts.
//!
//! Providers talk to their backends through a [`Transport`]; [`HttpTransport`]
//! is the `reqwest` implementation.

#![warn(missing_docs)]

pub mod analysis;
mod article;
pub mod http;
pub mod native;
pub mod sentiment;

use std::sync::Arc;

use newswire_core::{
    ANALYSIS, ContentProvider, NATIVE, NewswireError, Params, ProviderRegistry, SENTIMENT,
    Transport,
};

pub use analysis::AnalysisProvider;
pub use article::Article;
pub use http::HttpTransport;
pub use native::NativeProvider;
pub use sentiment::{SentimentProvider, SentimentSettings, SentimentVocabulary};

/// Legacy names kept resolvable for older callers.
pub const DEFAULT_ALIASES: [(&str, &str); 3] =
    [("default", NATIVE), ("ai", ANALYSIS), ("social", SENTIMENT)];

/// Probe `path` and treat any status below 500 as healthy.
///
/// A call that produced no response at all becomes `ProviderHealthCheckFailed`.
pub(crate) async fn probe(
    transport: &dyn Transport,
    provider: &str,
    path: &str,
    params: Params,
) -> Result<bool, NewswireError> {
    match transport
        .request(newswire_core::Method::Get, path, &params)
        .await
    {
        Ok(resp) => Ok(resp.status < 500),
        Err(e) => Err(NewswireError::health_check_failed(provider, e.to_string())),
    }
}

/// One transport per backend.
#[derive(Clone)]
pub struct ProviderTransports {
    /// Market-data backend behind [`NativeProvider`].
    pub native: Arc<dyn Transport>,
    /// AI content backend behind [`AnalysisProvider`].
    pub analysis: Arc<dyn Transport>,
    /// Social backend behind [`SentimentProvider`].
    pub sentiment: Arc<dyn Transport>,
}

impl ProviderTransports {
    /// Route every backend through the same transport.
    #[must_use]
    pub fn shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            native: Arc::clone(&transport),
            analysis: Arc::clone(&transport),
            sentiment: transport,
        }
    }
}

/// Register the three standard providers plus their legacy aliases.
///
/// Providers are built lazily on first resolve.
///
/// # Errors
/// Only fails if alias registration does, which cannot happen on a registry
/// that does not already use the alias names for other providers.
pub fn register_defaults(
    registry: &mut ProviderRegistry,
    transports: ProviderTransports,
    settings: SentimentSettings,
) -> Result<(), NewswireError> {
    let ProviderTransports {
        native,
        analysis,
        sentiment,
    } = transports;
    registry.register(NATIVE, move || {
        Ok(Arc::new(NativeProvider::new(Arc::clone(&native))) as Arc<dyn ContentProvider>)
    });
    registry.register(ANALYSIS, move || {
        Ok(Arc::new(AnalysisProvider::new(Arc::clone(&analysis))) as Arc<dyn ContentProvider>)
    });
    registry.register(SENTIMENT, move || {
        Ok(Arc::new(SentimentProvider::with_settings(
            Arc::clone(&sentiment),
            settings.clone(),
        )) as Arc<dyn ContentProvider>)
    });
    for (alias, canonical) in DEFAULT_ALIASES {
        registry.register_alias(alias, canonical)?;
    }
    Ok(())
}

/// A fresh registry holding the standard providers with default settings.
///
/// # Errors
/// See [`register_defaults`].
pub fn default_registry(transports: ProviderTransports) -> Result<ProviderRegistry, NewswireError> {
    let mut registry = ProviderRegistry::new();
    register_defaults(&mut registry, transports, SentimentSettings::default())?;
    Ok(registry)
}
