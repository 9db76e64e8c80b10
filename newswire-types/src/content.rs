use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NewswireError;

/// Category of content requested for a symbol.
///
/// The set is closed; string input is validated through [`FromStr`] and any
/// value outside the four labels is an `UnsupportedContentType` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Articles and headlines.
    News,
    /// Written or derived analysis.
    Analysis,
    /// Aggregate sentiment readings.
    Sentiment,
    /// Structured market events.
    Events,
}

impl ContentType {
    /// All content types in canonical order.
    pub const ALL: [Self; 4] = [Self::News, Self::Analysis, Self::Sentiment, Self::Events];

    /// Stable lower-case identifier for keys, logs and payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Analysis => "analysis",
            Self::Sentiment => "sentiment",
            Self::Events => "events",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = NewswireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(Self::News),
            "analysis" => Ok(Self::Analysis),
            "sentiment" => Ok(Self::Sentiment),
            "events" => Ok(Self::Events),
            other => Err(NewswireError::unsupported_content_type(other)),
        }
    }
}

/// Which provider should serve a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SourcePreference {
    /// Let the router pick the best healthy provider.
    #[default]
    Auto,
    /// Use the named provider (canonical name or legacy alias).
    Named(String),
}

impl SourcePreference {
    /// Label used in cache keys and error payloads.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Named(name) => name,
        }
    }

    /// Returns true for [`SourcePreference::Auto`].
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl From<&str> for SourcePreference {
    fn from(s: &str) -> Self {
        if s == "auto" {
            Self::Auto
        } else {
            Self::Named(s.to_string())
        }
    }
}

impl From<String> for SourcePreference {
    fn from(s: String) -> Self {
        if s == "auto" { Self::Auto } else { Self::Named(s) }
    }
}

impl From<SourcePreference> for String {
    fn from(p: SourcePreference) -> Self {
        match p {
            SourcePreference::Auto => "auto".to_string(),
            SourcePreference::Named(name) => name,
        }
    }
}

impl fmt::Display for SourcePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options for [`ContentRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentOptions {
    /// Provider preference; `auto` routes through the priority table.
    pub source: SourcePreference,
    /// Requested content category.
    pub content_type: ContentType,
    /// Lookback window label such as `1h`, `1d`, `7d`, `30d`.
    pub timeframe: String,
    /// Maximum number of items requested from the provider.
    pub limit: usize,
    /// Read from and write to the cache.
    pub cache: bool,
    /// Try alternate providers when an explicit source fails.
    pub fallback: bool,
    /// Optional sentiment filter (`positive`, `negative`, `neutral`, `bullish`, `bearish`).
    pub sentiment_filter: Option<String>,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            source: SourcePreference::Auto,
            content_type: ContentType::News,
            timeframe: "1d".to_string(),
            limit: 10,
            cache: true,
            fallback: true,
            sentiment_filter: None,
        }
    }
}

impl ContentOptions {
    /// Start from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider preference.
    #[must_use]
    pub fn source(mut self, source: impl Into<SourcePreference>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the content type.
    #[must_use]
    pub const fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Set the timeframe label.
    #[must_use]
    pub fn timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = timeframe.into();
        self
    }

    /// Set the item limit.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Toggle cache usage.
    #[must_use]
    pub const fn cache(mut self, yes: bool) -> Self {
        self.cache = yes;
        self
    }

    /// Toggle fallback to alternate providers.
    #[must_use]
    pub const fn fallback(mut self, yes: bool) -> Self {
        self.fallback = yes;
        self
    }

    /// Restrict sentiment-bearing content to one label.
    #[must_use]
    pub fn sentiment_filter(mut self, label: impl Into<String>) -> Self {
        self.sentiment_filter = Some(label.into());
        self
    }
}

/// A validated request for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
    symbol: String,
    /// Options the request was built with.
    pub options: ContentOptions,
}

impl ContentRequest {
    /// Build a request, normalizing the symbol to trimmed upper-case.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the symbol is empty after trimming.
    pub fn new(symbol: &str, options: ContentOptions) -> Result<Self, NewswireError> {
        let symbol = normalize_symbol(symbol)?;
        Ok(Self { symbol, options })
    }

    /// Canonical symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Requested content type.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.options.content_type
    }

    /// Copy of this request with another source preference and fallback disabled.
    #[must_use]
    pub fn pinned_to(&self, source: &str) -> Self {
        let mut options = self.options.clone();
        options.source = SourcePreference::from(source);
        options.fallback = false;
        Self {
            symbol: self.symbol.clone(),
            options,
        }
    }
}

/// Case-fold a symbol to its canonical form.
///
/// # Errors
/// Returns `InvalidArg` for an empty or whitespace-only symbol.
pub fn normalize_symbol(symbol: &str) -> Result<String, NewswireError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(NewswireError::InvalidArg("symbol must not be empty".to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}
