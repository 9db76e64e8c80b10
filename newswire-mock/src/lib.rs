//! newswire-mock
//!
//! Deterministic transports for tests and demos.
//!
//! - [`MockTransport`] answers every backend endpoint from static fixtures.
//!   The symbols `FAIL` and `TIMEOUT` force a 503 and a 200 ms delay.
//! - [`DynamicMockTransport`] defers every call to a [`DynamicMockController`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use newswire_core::{Method, NewswireError, Params, Transport, TransportResponse};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockTransport, MockBehavior, RecordedRequest};

/// Symbol that makes every endpoint answer 503.
pub const FAIL_SYMBOL: &str = "FAIL";
/// Symbol that makes every endpoint answer after a short delay.
pub const TIMEOUT_SYMBOL: &str = "TIMEOUT";

/// Fixture-backed transport speaking all three backend APIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTransport;

impl MockTransport {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(symbol: &str, path: &str) -> Option<TransportResponse> {
        match symbol {
            FAIL_SYMBOL => Some(TransportResponse::new(
                503,
                json!({"error": format!("forced failure: {path}")}),
            )),
            TIMEOUT_SYMBOL => {
                tokio::time::sleep(Duration::from_millis(200)).await;
                None
            }
            _ => None,
        }
    }
}

fn symbol_of(params: &Params) -> &str {
    params
        .get("symbol")
        .or_else(|| params.get("symbols"))
        .map_or("", String::as_str)
}

fn limited(items: Vec<Value>, params: &Params) -> Vec<Value> {
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    items.into_iter().take(limit).collect()
}

fn posts_page(symbol: &str, params: &Params) -> Value {
    let page = params
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    let size = params
        .get("page_size")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(50)
        .max(1);
    let wanted = params.get("sentiment");
    let all: Vec<Value> = fixtures::social::posts_by_symbol(symbol)
        .into_iter()
        .filter(|p| wanted.is_none_or(|w| p["sentimentLabel"].as_str() == Some(w.as_str())))
        .collect();
    let start = (page - 1) * size;
    let posts: Vec<Value> = all.iter().skip(start).take(size).cloned().collect();
    json!({
        "posts": posts,
        "has_more": start + size < all.len(),
    })
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        _method: Method,
        path: &str,
        params: &Params,
    ) -> Result<TransportResponse, NewswireError> {
        let symbol = symbol_of(params);
        if let Some(resp) = Self::maybe_fail_or_timeout(symbol, path).await {
            return Ok(resp);
        }
        let body = match path {
            "markets/news" => {
                json!({"articles": limited(fixtures::articles::by_symbol(symbol), params)})
            }
            "ai/news" => {
                json!({"articles": limited(fixtures::articles::ai_by_symbol(symbol), params)})
            }
            "ai/analysis" => fixtures::ai::ai_analysis(symbol),
            "ai/sentiment" => fixtures::ai::ai_sentiment(symbol),
            "ai/status" => json!({"status": "ok"}),
            "social/posts" => posts_page(symbol, params),
            "social/mood" => match fixtures::social::mood_by_symbol(symbol) {
                Some(m) => json!({"mood_index": m}),
                None => json!({}),
            },
            _ => {
                return Ok(TransportResponse::new(
                    404,
                    json!({"error": format!("unknown endpoint: {path}")}),
                ));
            }
        };
        Ok(TransportResponse::new(200, body))
    }
}
