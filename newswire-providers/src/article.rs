use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use newswire_core::NewswireError;

/// Article record shared by the native and analysis backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Backend identifier; numeric ids are kept as their decimal text.
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    /// Headline.
    pub title: String,
    /// Short abstract; empty when the backend sent none.
    #[serde(default)]
    pub summary: String,
    /// Full body text; empty when the backend sent none.
    #[serde(default)]
    pub content: String,
    /// Link to the original story.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Publisher name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Unix seconds.
    #[serde(
        default,
        deserialize_with = "opt_unix_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<i64>,
    /// Model-written summary, only set by the analysis backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl Article {
    /// Title, summary and content joined and case-folded for keyword matching.
    #[must_use]
    pub fn folded_text(&self) -> String {
        format!("{} {} {}", self.title, self.summary, self.content).to_lowercase()
    }
}

/// Deserialize `body[field]` into `T`, tagging failures with the provider name.
pub(crate) fn field<T: DeserializeOwned>(
    body: &Value,
    field: &str,
    provider: &str,
) -> Result<T, NewswireError> {
    let raw = body
        .get(field)
        .ok_or_else(|| NewswireError::Data(format!("{provider}: missing `{field}`")))?;
    serde_json::from_value(raw.clone())
        .map_err(|e| NewswireError::Data(format!("{provider}: bad `{field}`: {e}")))
}

/// Accept string or numeric identifiers.
pub(crate) fn id_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn seconds_of(v: &Value) -> Option<i64> {
    let truncate = |f: f64| f.is_finite().then(|| f.trunc() as i64);
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Unix seconds from an integer, a fractional number or a numeric string.
///
/// Fractions are truncated toward zero; `null` reads as 0.
pub(crate) fn unix_seconds<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(opt_unix_seconds(de)?.unwrap_or(0))
}

pub(crate) fn opt_unix_seconds<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::Null => Ok(None),
        v => seconds_of(&v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("not a unix timestamp: {v}"))),
    }
}
