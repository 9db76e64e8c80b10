use serde::{Deserialize, Serialize};

use crate::content::ContentType;

/// Static description of what a provider can serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Content types the provider answers.
    pub content_types: Vec<ContentType>,
    /// Largest item limit the backend honors.
    pub max_limit: usize,
    /// Timeframe labels the backend understands.
    pub timeframes: Vec<String>,
    /// Whether content is pushed in near real time.
    pub real_time: bool,
    /// Short human-readable description.
    pub description: String,
}

impl Capabilities {
    /// Returns true if `content_type` is listed.
    #[must_use]
    pub fn supports(&self, content_type: ContentType) -> bool {
        self.content_types.contains(&content_type)
    }
}

/// Snapshot of a provider as seen by the registry.
///
/// `healthy` is computed at snapshot time and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Unique provider name.
    pub name: String,
    /// Content types the provider answers.
    pub supported_types: Vec<ContentType>,
    /// Advertised capabilities.
    pub capabilities: Capabilities,
    /// Probe result at snapshot time.
    pub healthy: bool,
}
