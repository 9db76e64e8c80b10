//! AI-generated content backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use newswire_core::{
    ANALYSIS, Capabilities, CanonicalResponse, ContentProvider, ContentRequest, ContentType,
    Method, Mood, NewswireError, Params, SentimentLabel, Transport, now_ts, params,
};

use crate::article::{Article, field};

const MAX_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
struct AiAnalysis {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    key_points: Vec<String>,
    #[serde(default)]
    outlook: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AiSentiment {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    score: f64,
}

/// Normalize a backend label to the canonical vocabulary; unknown labels are neutral.
fn canonical_label(raw: Option<&str>) -> SentimentLabel {
    raw.and_then(SentimentLabel::parse_lenient)
        .unwrap_or(SentimentLabel::Neutral)
}

/// Map a score in `[-1, 1]` onto a mood index in `[0, 1]`.
#[must_use]
pub fn mood_index_from_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.5;
    }
    ((score + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Connector for the AI content API.
pub struct AnalysisProvider {
    transport: Arc<dyn Transport>,
}

impl AnalysisProvider {
    /// Provider talking to the AI backend through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn get(
        &self,
        path: &str,
        req: &ContentRequest,
    ) -> Result<serde_json::Value, NewswireError> {
        let p = params([
            ("symbol", req.symbol().to_string()),
            ("timeframe", req.options.timeframe.clone()),
        ]);
        self.transport
            .request(Method::Get, path, &p)
            .await?
            .into_body(ANALYSIS)
    }
}

#[async_trait]
impl ContentProvider for AnalysisProvider {
    fn name(&self) -> &str {
        ANALYSIS
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            content_types: vec![
                ContentType::News,
                ContentType::Analysis,
                ContentType::Sentiment,
            ],
            max_limit: MAX_LIMIT,
            timeframes: ["1d", "7d", "30d"].map(String::from).to_vec(),
            real_time: false,
            description: "Model-generated summaries, outlooks and sentiment".to_string(),
        }
    }

    async fn is_healthy(&self) -> Result<bool, NewswireError> {
        crate::probe(self.transport.as_ref(), ANALYSIS, "ai/status", Params::new()).await
    }

    async fn news(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let limit = req.options.limit.clamp(1, MAX_LIMIT);
        let p = params([
            ("symbol", req.symbol().to_string()),
            ("limit", limit.to_string()),
            ("timeframe", req.options.timeframe.clone()),
        ]);
        let body = self
            .transport
            .request(Method::Get, "ai/news", &p)
            .await?
            .into_body(ANALYSIS)?;
        let articles: Vec<Article> = field(&body, "articles", ANALYSIS)?;
        Ok(CanonicalResponse::ok(
            ANALYSIS,
            200,
            json!({
                "symbol": req.symbol(),
                "provider": ANALYSIS,
                "timeframe": req.options.timeframe,
                "count": articles.len(),
                "articles": articles,
                "timestamp": now_ts(),
            }),
        ))
    }

    async fn analysis(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let body = self.get("ai/analysis", req).await?;
        let a: AiAnalysis = serde_json::from_value(body)
            .map_err(|e| NewswireError::Data(format!("{ANALYSIS}: bad analysis: {e}")))?;
        let outlook = canonical_label(a.outlook.as_deref());
        Ok(CanonicalResponse::ok(
            ANALYSIS,
            200,
            json!({
                "symbol": req.symbol(),
                "provider": ANALYSIS,
                "analysis": {
                    "kind": "ai",
                    "summary": a.summary,
                    "key_points": a.key_points,
                    "outlook": outlook,
                    "confidence": a.confidence.map(|c| c.clamp(0.0, 1.0)),
                },
                "timestamp": now_ts(),
            }),
        ))
    }

    async fn sentiment(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let body = self.get("ai/sentiment", req).await?;
        let s: AiSentiment = serde_json::from_value(body)
            .map_err(|e| NewswireError::Data(format!("{ANALYSIS}: bad sentiment: {e}")))?;
        let label = canonical_label(s.label.as_deref());
        let index = mood_index_from_score(s.score);
        Ok(CanonicalResponse::ok(
            ANALYSIS,
            200,
            json!({
                "symbol": req.symbol(),
                "provider": ANALYSIS,
                "sentiment": {
                    "label": label,
                    "score": s.score,
                    "mood_index": index,
                    "mood": Mood::from_index(index),
                },
                "timestamp": now_ts(),
            }),
        ))
    }
}
