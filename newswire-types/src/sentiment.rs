use core::fmt;

use serde::{Deserialize, Serialize};

/// Canonical sentiment vocabulary exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Favorable.
    Positive,
    /// Neither favorable nor unfavorable.
    Neutral,
    /// Unfavorable.
    Negative,
}

impl SentimentLabel {
    /// Stable lower-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Parse a standard label, accepting `bullish`/`bearish` as aliases.
    ///
    /// Matching is case-insensitive; unknown labels yield `None`.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "bullish" => Some(Self::Positive),
            "negative" | "bearish" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpretation of a mood index in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Index at or above 0.6.
    Bullish,
    /// Index strictly between 0.4 and 0.6.
    Neutral,
    /// Index at or below 0.4.
    Bearish,
}

impl Mood {
    /// Interpret a mood index.
    #[must_use]
    pub fn from_index(index: f64) -> Self {
        if index >= 0.6 {
            Self::Bullish
        } else if index <= 0.4 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    /// Stable lower-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Neutral => "neutral",
            Self::Bearish => "bearish",
        }
    }
}
