//! `reqwest`-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use newswire_core::{Method, NewswireError, Params, Transport, TransportResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP transport rooted at a base URL.
///
/// Paths passed to [`Transport::request`] are joined onto the base, so
/// `https://api.example.com/v1` plus `markets/news` hits
/// `https://api.example.com/v1/markets/news`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    /// Transport with a default client and a 10 second timeout.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `base` is not an absolute URL, or `Transport`
    /// when the client cannot be built.
    pub fn new(base: &str) -> Result<Self, NewswireError> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    /// Transport with a default client and a custom timeout.
    ///
    /// # Errors
    /// See [`HttpTransport::new`].
    pub fn with_timeout(base: &str, timeout: Duration) -> Result<Self, NewswireError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NewswireError::Transport(e.to_string()))?;
        Self::with_client(base, client)
    }

    /// Transport over a caller-built client. A trailing slash is added to
    /// the base path so relative paths join beneath it.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `base` is not an absolute URL.
    pub fn with_client(base: &str, client: reqwest::Client) -> Result<Self, NewswireError> {
        let mut base =
            Url::parse(base).map_err(|e| NewswireError::InvalidArg(format!("base url: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    /// Base URL every request path is joined onto.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, NewswireError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| NewswireError::InvalidArg(format!("path {path}: {e}")))
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[async_trait]
impl Transport for HttpTransport {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "newswire_providers::http::request",
            skip(self, params),
            fields(base = %self.base),
        )
    )]
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<TransportResponse, NewswireError> {
        let url = self.endpoint(path)?;
        let builder = match method {
            Method::Get => self.client.get(url).query(params),
            Method::Post => self.client.post(url).json(params),
        };
        let resp = builder
            .send()
            .await
            .map_err(|e| NewswireError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| NewswireError::Transport(e.to_string()))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(status, len = bytes.len(), "response received");
        Ok(TransportResponse::new(status, decode_body(&bytes)))
    }
}
