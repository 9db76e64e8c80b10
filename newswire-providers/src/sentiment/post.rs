use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Value, json};

use super::vocabulary::{Bucket, SentimentVocabulary};
use crate::article::{id_string, unix_seconds};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Security {
    pub ticker: String,
}

/// Post as delivered by the social backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WirePost {
    #[serde(default, deserialize_with = "id_string")]
    id: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    sentiment_label: Option<String>,
    #[serde(default, deserialize_with = "unix_seconds")]
    timestamp: i64,
    #[serde(default)]
    sectors: BTreeSet<String>,
    #[serde(default)]
    affected_securities: Vec<Security>,
}

/// A social post with its sentiment resolved to an internal bucket.
///
/// Lives only for the duration of one provider call.
#[derive(Debug, Clone)]
pub struct SentimentPost {
    /// Backend identifier.
    pub id: String,
    /// Short form of the post.
    pub summary: String,
    /// Full post text.
    pub content: String,
    /// Resolved sentiment; unknown wire labels read as flat.
    pub bucket: Bucket,
    /// Unix seconds, truncated when the backend sends fractions.
    pub timestamp: i64,
    /// Sectors the post mentions.
    pub sectors: BTreeSet<String>,
    /// Tickers the post mentions.
    pub securities: Vec<String>,
}

impl SentimentPost {
    /// Resolve a wire post; unrecognized labels land in the flat bucket.
    pub(crate) fn from_wire(post: WirePost, vocabulary: &SentimentVocabulary) -> Self {
        let bucket = post
            .sentiment_label
            .as_deref()
            .and_then(|l| vocabulary.bucket_of(l))
            .unwrap_or(Bucket::Flat);
        Self {
            id: post.id,
            summary: post.summary,
            content: post.content,
            bucket,
            timestamp: post.timestamp,
            sectors: post.sectors,
            securities: post
                .affected_securities
                .into_iter()
                .map(|s| s.ticker)
                .collect(),
        }
    }

    /// True for the flat bucket.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.bucket == Bucket::Flat
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "summary": self.summary,
            "content": self.content,
            "sentiment": self.bucket.label(),
            "timestamp": self.timestamp,
            "sectors": self.sectors,
            "securities": self.securities,
        })
    }
}
