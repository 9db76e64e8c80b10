//! Request-execution primitive consumed by provider adapters.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use newswire_types::NewswireError;

/// Request method understood by transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in the request body.
    Post,
}

/// Request parameters, ordered for deterministic encoding.
pub type Params = BTreeMap<String, String>;

/// Build [`Params`] from key/value pairs.
pub fn params<I, K, V>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Structured transport result.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP-like status code.
    pub status: u16,
    /// Decoded body; non-JSON bodies are carried as a string value.
    pub body: Value,
}

impl TransportResponse {
    /// Build a response.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Statuses below 400 are successes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status < 400
    }

    /// Return the body on success, or a `Provider` error tagged with `provider`.
    ///
    /// # Errors
    /// Returns `Provider` with the status and the body's `error`/`message` text.
    pub fn into_body(self, provider: &str) -> Result<Value, NewswireError> {
        if self.is_success() {
            return Ok(self.body);
        }
        let msg = self
            .body
            .get("error")
            .or_else(|| self.body.get("message"))
            .and_then(Value::as_str)
            .map_or_else(|| format!("status {}", self.status), str::to_string);
        Err(NewswireError::provider(provider, Some(self.status), msg))
    }
}

/// Blocking-style request/response primitive.
///
/// Retry, backoff, authentication and timeouts are the transport's concern.
/// `Err` is reserved for calls that produced no response at all.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `method` on `path` with `params`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<TransportResponse, NewswireError>;
}
