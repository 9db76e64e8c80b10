use async_trait::async_trait;

use newswire_types::{
    Capabilities, CanonicalResponse, ContentRequest, ContentType, NewswireError,
    ProviderDescriptor,
};

/// Capability interface implemented by every content backend.
///
/// Content methods default to `ProviderUnsupportedType`; implementors override
/// the ones listed in [`ContentProvider::capabilities`]. Operational failures are
/// returned as `Err` so the orchestrator can fall back to another provider.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Unique provider name used in responses and routing tables.
    fn name(&self) -> &str;

    /// Static description of what this provider serves.
    fn capabilities(&self) -> Capabilities;

    /// Whether this provider answers `content_type`.
    fn supports(&self, content_type: ContentType) -> bool {
        self.capabilities().supports(content_type)
    }

    /// Live probe of the backend.
    ///
    /// `Ok(false)` means the backend answered with a server-side failure; `Err`
    /// means the probe itself could not run.
    async fn is_healthy(&self) -> Result<bool, NewswireError>;

    /// Fetch articles for the request's symbol.
    async fn news(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let _ = req;
        Err(NewswireError::unsupported_type(self.name(), ContentType::News.as_str()))
    }

    /// Fetch analysis for the request's symbol.
    async fn analysis(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let _ = req;
        Err(NewswireError::unsupported_type(self.name(), ContentType::Analysis.as_str()))
    }

    /// Fetch a sentiment reading for the request's symbol.
    async fn sentiment(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let _ = req;
        Err(NewswireError::unsupported_type(self.name(), ContentType::Sentiment.as_str()))
    }

    /// Fetch structured events for the request's symbol.
    async fn events(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let _ = req;
        Err(NewswireError::unsupported_type(self.name(), ContentType::Events.as_str()))
    }

    /// Snapshot of this provider including a fresh health probe.
    async fn descriptor(&self) -> ProviderDescriptor {
        let capabilities = self.capabilities();
        ProviderDescriptor {
            name: self.name().to_string(),
            supported_types: capabilities.content_types.clone(),
            capabilities,
            healthy: self.is_healthy().await.unwrap_or(false),
        }
    }
}

/// Call the content method matching the request's content type.
///
/// A provider that does not advertise the type is rejected before any call;
/// a response with `successful == false` is turned into a `Provider` error so
/// every failure takes the same path.
///
/// # Errors
/// Returns `ProviderUnsupportedType` or whatever the provider call produced.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "newswire_core::dispatch",
        skip(provider, req),
        fields(provider = provider.name(), symbol = req.symbol(), content_type = %req.content_type()),
    )
)]
pub async fn dispatch(
    provider: &dyn ContentProvider,
    req: &ContentRequest,
) -> Result<CanonicalResponse, NewswireError> {
    let content_type = req.content_type();
    if !provider.supports(content_type) {
        return Err(NewswireError::unsupported_type(
            provider.name(),
            content_type.as_str(),
        ));
    }
    let resp = match content_type {
        ContentType::News => provider.news(req).await?,
        ContentType::Analysis => provider.analysis(req).await?,
        ContentType::Sentiment => provider.sentiment(req).await?,
        ContentType::Events => provider.events(req).await?,
    };
    if resp.successful {
        Ok(resp)
    } else {
        let msg = resp
            .error_message()
            .map_or_else(|| format!("status {}", resp.status), str::to_string);
        Err(NewswireError::provider(provider.name(), Some(resp.status), msg))
    }
}
