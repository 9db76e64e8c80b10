//! Social-sentiment backend.
//!
//! Posts arrive paginated and labeled in the backend's own vocabulary; they are
//! mapped onto internal buckets, scored locally and folded into canonical
//! responses.

mod post;
pub mod scoring;
mod vocabulary;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use newswire_core::{
    Capabilities, CanonicalResponse, ContentProvider, ContentRequest, ContentType, Method, Mood,
    NewswireError, SENTIMENT, Transport, now_ts, params,
};

pub use post::SentimentPost;
pub use vocabulary::{Bucket, SentimentVocabulary};

use post::WirePost;
use scoring::{
    confidence, derived_mood_index, distribution, engagement, is_social_event, key_posts,
    pages_for_timeframe, trend, virality, volatility,
};

const POSTS_PATH: &str = "social/posts";
const MOOD_PATH: &str = "social/mood";

/// Tunables for [`SentimentProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSettings {
    /// Labels the backend uses on the wire.
    pub vocabulary: SentimentVocabulary,
    /// Number of key posts reported with sentiment results.
    pub key_post_count: usize,
    /// Posts requested per backend page.
    pub page_size: usize,
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self {
            vocabulary: SentimentVocabulary::default(),
            key_post_count: 5,
            page_size: 50,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostsPage {
    #[serde(default)]
    posts: Vec<WirePost>,
    #[serde(default)]
    has_more: bool,
}

/// Connector for the social-sentiment API.
pub struct SentimentProvider {
    transport: Arc<dyn Transport>,
    settings: SentimentSettings,
}

impl SentimentProvider {
    /// Provider with default settings.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_settings(transport, SentimentSettings::default())
    }

    /// Provider with custom vocabulary, paging and key post count.
    #[must_use]
    pub fn with_settings(transport: Arc<dyn Transport>, settings: SentimentSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Settings this provider was built with.
    #[must_use]
    pub fn settings(&self) -> &SentimentSettings {
        &self.settings
    }

    /// Pull every page the timeframe calls for, stopping early when the backend runs dry.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "newswire_providers::sentiment::fetch_posts",
            skip(self, req),
            fields(symbol = %req.symbol(), timeframe = %req.options.timeframe),
        )
    )]
    async fn fetch_posts(&self, req: &ContentRequest) -> Result<Vec<SentimentPost>, NewswireError> {
        let filter = req
            .options
            .sentiment_filter
            .as_deref()
            .map(|f| self.settings.vocabulary.filter_for(f))
            .transpose()?;

        let mut posts = Vec::new();
        for page in 1..=pages_for_timeframe(&req.options.timeframe) {
            let mut p = params([
                ("symbol", req.symbol().to_string()),
                ("page", page.to_string()),
                ("page_size", self.settings.page_size.to_string()),
            ]);
            if let Some(wire) = filter {
                p.insert("sentiment".to_string(), wire.to_string());
            }
            let body = self
                .transport
                .request(Method::Get, POSTS_PATH, &p)
                .await?
                .into_body(SENTIMENT)?;
            let page: PostsPage = serde_json::from_value(body)
                .map_err(|e| NewswireError::Data(format!("{SENTIMENT}: bad posts page: {e}")))?;
            posts.extend(
                page.posts
                    .into_iter()
                    .map(|w| SentimentPost::from_wire(w, &self.settings.vocabulary)),
            );
            if !page.has_more {
                break;
            }
        }
        Ok(posts)
    }

    /// Backend mood index, or one derived from `posts` when the backend has none.
    async fn mood_index(&self, req: &ContentRequest, posts: &[SentimentPost]) -> f64 {
        let p = params([("symbol", req.symbol())]);
        let reported = match self.transport.request(Method::Get, MOOD_PATH, &p).await {
            Ok(resp) => resp
                .into_body(SENTIMENT)
                .ok()
                .and_then(|b| b.get("mood_index").and_then(Value::as_f64)),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "mood endpoint unavailable, deriving from sample");
                None
            }
        };
        reported
            .filter(|m| m.is_finite())
            .map_or_else(|| derived_mood_index(posts), |m| m.clamp(0.0, 1.0))
    }

    async fn summary(&self, req: &ContentRequest) -> Result<(Vec<SentimentPost>, Value), NewswireError> {
        let posts = self.fetch_posts(req).await?;
        let index = self.mood_index(req, &posts).await;
        let summary = json!({
            "mood_index": index,
            "mood": Mood::from_index(index),
            "confidence": confidence(index),
            "distribution": distribution(&posts),
            "trend": trend(&posts),
            "volatility": volatility(&posts),
            "post_count": posts.len(),
        });
        Ok((posts, summary))
    }
}

fn respond(req: &ContentRequest, key: &str, value: Value) -> CanonicalResponse {
    let mut payload = json!({
        "symbol": req.symbol(),
        "provider": SENTIMENT,
        "timestamp": now_ts(),
    });
    payload[key] = value;
    CanonicalResponse::ok(SENTIMENT, 200, payload)
}

#[async_trait]
impl ContentProvider for SentimentProvider {
    fn name(&self) -> &str {
        SENTIMENT
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            content_types: ContentType::ALL.to_vec(),
            max_limit: self.settings.page_size.saturating_mul(30),
            timeframes: ["1h", "1d", "7d", "30d"].map(String::from).to_vec(),
            real_time: true,
            description: "Social post sentiment with locally derived mood scoring".to_string(),
        }
    }

    async fn is_healthy(&self) -> Result<bool, NewswireError> {
        crate::probe(
            self.transport.as_ref(),
            SENTIMENT,
            POSTS_PATH,
            params([("symbol", "SPY"), ("page", "1"), ("page_size", "1")]),
        )
        .await
    }

    async fn news(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let posts = self.fetch_posts(req).await?;
        let shown: Vec<Value> = posts
            .iter()
            .take(req.options.limit)
            .map(|p| {
                let mut v = p.to_json();
                v["engagement"] = json!(engagement(p));
                v["virality"] = json!(virality(p));
                v
            })
            .collect();
        let mut resp = respond(req, "posts", Value::Array(shown));
        resp.payload["count"] = json!(posts.len().min(req.options.limit));
        Ok(resp)
    }

    async fn analysis(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let (_, mut summary) = self.summary(req).await?;
        summary["kind"] = json!("social");
        Ok(respond(req, "analysis", summary))
    }

    async fn sentiment(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let (posts, mut summary) = self.summary(req).await?;
        summary["key_posts"] = key_posts(&posts, self.settings.key_post_count)
            .into_iter()
            .map(SentimentPost::to_json)
            .collect();
        Ok(respond(req, "sentiment", summary))
    }

    async fn events(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let posts = self.fetch_posts(req).await?;
        let events: Vec<Value> = posts
            .iter()
            .filter(|p| is_social_event(p))
            .map(|p| {
                json!({
                    "id": p.id,
                    "type": "social",
                    "sentiment": p.bucket.label(),
                    "summary": p.summary,
                    "securities": p.securities,
                    "sectors": p.sectors,
                    "virality": virality(p),
                    "timestamp": p.timestamp,
                })
            })
            .collect();
        let mut resp = respond(req, "events", Value::Array(events));
        resp.payload["count"] = json!(resp.payload["events"].as_array().map_or(0, Vec::len));
        Ok(resp)
    }
}
