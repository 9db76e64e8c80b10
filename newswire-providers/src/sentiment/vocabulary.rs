use serde::{Deserialize, Serialize};

use newswire_core::{NewswireError, SentimentLabel};

/// Internal sentiment bucket of the social backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// Maps to [`SentimentLabel::Positive`].
    Up,
    /// Maps to [`SentimentLabel::Neutral`].
    Flat,
    /// Maps to [`SentimentLabel::Negative`].
    Down,
}

impl Bucket {
    /// Bucket for a canonical label.
    #[must_use]
    pub const fn from_label(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => Self::Up,
            SentimentLabel::Neutral => Self::Flat,
            SentimentLabel::Negative => Self::Down,
        }
    }

    /// Canonical label of this bucket.
    #[must_use]
    pub const fn label(self) -> SentimentLabel {
        match self {
            Self::Up => SentimentLabel::Positive,
            Self::Flat => SentimentLabel::Neutral,
            Self::Down => SentimentLabel::Negative,
        }
    }
}

/// Wire strings the social backend uses for each bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentVocabulary {
    /// Wire label for positive posts. Default `optimistic`.
    pub up: String,
    /// Wire label for neutral posts. Default `indifferent`.
    pub flat: String,
    /// Wire label for negative posts. Default `pessimistic`.
    pub down: String,
}

impl Default for SentimentVocabulary {
    fn default() -> Self {
        Self {
            up: "optimistic".to_string(),
            flat: "indifferent".to_string(),
            down: "pessimistic".to_string(),
        }
    }
}

impl SentimentVocabulary {
    /// Wire string for `bucket`.
    #[must_use]
    pub fn wire(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Up => &self.up,
            Bucket::Flat => &self.flat,
            Bucket::Down => &self.down,
        }
    }

    /// Bucket of a wire string. Standard labels are accepted as well.
    #[must_use]
    pub fn bucket_of(&self, wire: &str) -> Option<Bucket> {
        let wire = wire.trim();
        [Bucket::Up, Bucket::Flat, Bucket::Down]
            .into_iter()
            .find(|b| self.wire(*b).eq_ignore_ascii_case(wire))
            .or_else(|| SentimentLabel::parse_lenient(wire).map(Bucket::from_label))
    }

    /// Translate a caller-facing filter into the backend's wire string.
    ///
    /// # Errors
    /// Returns `InvalidArg` for anything that is not a standard label or a
    /// `bullish`/`bearish` alias.
    pub fn filter_for(&self, filter: &str) -> Result<&str, NewswireError> {
        SentimentLabel::parse_lenient(filter)
            .map(|label| self.wire(Bucket::from_label(label)))
            .ok_or_else(|| NewswireError::InvalidArg(format!("unknown sentiment filter: {filter}")))
    }
}
