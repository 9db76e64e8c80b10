use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::capability::Capabilities;
use crate::content::ContentRequest;
use crate::error::NewswireError;

/// Provider-agnostic result returned by adapters and by the manager.
///
/// `successful` together with `payload.error` / `payload.message` is the single
/// source of truth for failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResponse {
    /// Whether the call produced content.
    pub successful: bool,
    /// HTTP-like status of the outcome.
    pub status: u16,
    /// Provider that produced the payload (or the requested source on failure).
    pub provider: String,
    /// Content payload; shape depends on the content type.
    pub payload: Value,
    /// Creation time as unix seconds.
    pub timestamp: i64,
}

impl CanonicalResponse {
    /// Successful response stamped with the current time.
    #[must_use]
    pub fn ok(provider: impl Into<String>, status: u16, payload: Value) -> Self {
        Self {
            successful: true,
            status,
            provider: provider.into(),
            payload,
            timestamp: now_ts(),
        }
    }

    /// Error response describing a failed request.
    ///
    /// The payload carries `error`, `message`, `symbol`, `source` and
    /// `content_type` so callers never need the error value itself.
    #[must_use]
    pub fn failure(req: &ContentRequest, err: &NewswireError) -> Self {
        let message = err.to_string();
        let timestamp = now_ts();
        Self {
            successful: false,
            status: err.status_hint(),
            provider: req.options.source.as_str().to_string(),
            payload: json!({
                "error": message,
                "message": message,
                "symbol": req.symbol(),
                "source": req.options.source.as_str(),
                "content_type": req.content_type().as_str(),
                "timestamp": timestamp,
            }),
            timestamp,
        }
    }

    /// Failure message carried in the payload, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.payload
            .get("error")
            .or_else(|| self.payload.get("message"))
            .and_then(Value::as_str)
    }
}

/// Result of querying several explicit sources for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResponse {
    /// Canonical symbol.
    pub symbol: String,
    /// Sources attempted, in request order, without duplicates.
    pub sources: Vec<String>,
    /// Successful payloads keyed by provider name.
    pub results: BTreeMap<String, Value>,
    /// Failure messages keyed by provider name.
    pub errors: BTreeMap<String, String>,
    /// Number of entries in `results`.
    pub success_count: usize,
    /// Number of sources attempted.
    pub total_sources: usize,
}

/// Outcome of a provider health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Probe answered below status 500.
    Healthy,
    /// Probe answered but reported a server-side failure.
    Unhealthy,
    /// Resolution or probing raised an error.
    Error,
}

/// Health report entry for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Provider name.
    pub name: String,
    /// Probe outcome.
    pub status: HealthStatus,
    /// Advertised capabilities; absent when the provider could not be resolved.
    pub capabilities: Option<Capabilities>,
    /// Error message when `status` is `error`.
    pub message: Option<String>,
}

/// Current time as unix seconds.
#[must_use]
pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}
