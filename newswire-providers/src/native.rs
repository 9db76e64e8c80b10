//! Native market-data backend: articles, headline analysis and keyword-classified events.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use newswire_core::{
    Capabilities, CanonicalResponse, ContentProvider, ContentRequest, ContentType, Method,
    NATIVE, NewswireError, Transport, now_ts, params,
};

use crate::article::{Article, field};

const NEWS_PATH: &str = "markets/news";
const MAX_LIMIT: usize = 100;

/// Keywords that make an article count as an event.
pub const EVENT_KEYWORDS: [&str; 7] = [
    "earnings",
    "dividend",
    "split",
    "merger",
    "acquisition",
    "announcement",
    "launch",
];

const HIGH_IMPACT: [&str; 4] = ["earnings", "merger", "acquisition", "bankruptcy"];
const MEDIUM_IMPACT: [&str; 3] = ["dividend", "split", "partnership"];

/// Event type assigned to an article by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Earnings reports.
    Earnings,
    /// Dividend declarations.
    Dividend,
    /// Stock splits.
    Split,
    /// Mergers and acquisitions.
    Merger,
    /// Company announcements.
    Announcement,
    /// Matched an event keyword without a more specific type.
    News,
}

impl EventKind {
    /// Type of an event from case-folded text, by keyword priority.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        if text.contains("earnings") {
            Self::Earnings
        } else if text.contains("dividend") {
            Self::Dividend
        } else if text.contains("split") {
            Self::Split
        } else if text.contains("merger") || text.contains("acquisition") {
            Self::Merger
        } else if text.contains("announcement") {
            Self::Announcement
        } else {
            Self::News
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Earnings => "earnings",
            Self::Dividend => "dividend",
            Self::Split => "split",
            Self::Merger => "merger",
            Self::Announcement => "announcement",
            Self::News => "news",
        }
    }
}

/// Expected market impact of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Earnings, mergers, acquisitions and bankruptcies.
    High,
    /// Dividends, splits and partnerships.
    Medium,
    /// Anything else.
    Low,
}

impl Impact {
    /// Impact of case-folded `text`, highest matching tier first.
    #[must_use]
    pub fn assess(text: &str) -> Self {
        if HIGH_IMPACT.iter().any(|k| text.contains(k)) {
            Self::High
        } else if MEDIUM_IMPACT.iter().any(|k| text.contains(k)) {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Returns true if case-folded `text` mentions any event keyword.
#[must_use]
pub fn is_event(text: &str) -> bool {
    EVENT_KEYWORDS.iter().any(|k| text.contains(k))
}

#[derive(Debug, Clone, Serialize)]
struct MarketEvent {
    id: String,
    #[serde(rename = "type")]
    kind: EventKind,
    impact: Impact,
    title: String,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<i64>,
}

fn classify_articles(articles: Vec<Article>) -> Vec<MarketEvent> {
    articles
        .into_iter()
        .filter_map(|a| {
            let text = a.folded_text();
            if !is_event(&text) {
                return None;
            }
            Some(MarketEvent {
                id: a.id,
                kind: EventKind::classify(&text),
                impact: Impact::assess(&text),
                title: a.title,
                summary: a.summary,
                url: a.url,
                published_at: a.published_at,
            })
        })
        .collect()
}

/// Connector for the native market-data API.
pub struct NativeProvider {
    transport: Arc<dyn Transport>,
}

impl NativeProvider {
    /// Provider talking to the market-data backend through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn fetch_articles(&self, req: &ContentRequest) -> Result<Vec<Article>, NewswireError> {
        let limit = req.options.limit.clamp(1, MAX_LIMIT);
        let p = params([
            ("symbols", req.symbol().to_string()),
            ("limit", limit.to_string()),
            ("timeframe", req.options.timeframe.clone()),
        ]);
        let body = self
            .transport
            .request(Method::Get, NEWS_PATH, &p)
            .await?
            .into_body(NATIVE)?;
        field(&body, "articles", NATIVE)
    }
}

#[async_trait]
impl ContentProvider for NativeProvider {
    fn name(&self) -> &str {
        NATIVE
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            content_types: vec![ContentType::News, ContentType::Analysis, ContentType::Events],
            max_limit: MAX_LIMIT,
            timeframes: ["1h", "1d", "7d", "30d"].map(String::from).to_vec(),
            real_time: true,
            description: "Exchange-sourced headlines with locally classified events".to_string(),
        }
    }

    async fn is_healthy(&self) -> Result<bool, NewswireError> {
        crate::probe(
            self.transport.as_ref(),
            NATIVE,
            NEWS_PATH,
            params([("symbols", "SPY"), ("limit", "1")]),
        )
        .await
    }

    async fn news(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let articles = self.fetch_articles(req).await?;
        Ok(CanonicalResponse::ok(
            NATIVE,
            200,
            json!({
                "symbol": req.symbol(),
                "provider": NATIVE,
                "timeframe": req.options.timeframe,
                "count": articles.len(),
                "articles": articles,
                "timestamp": now_ts(),
            }),
        ))
    }

    async fn analysis(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let articles = self.fetch_articles(req).await?;
        let article_count = articles.len();
        let highlights: Vec<String> = articles.iter().take(3).map(|a| a.title.clone()).collect();
        let events = classify_articles(articles);

        let mut by_type: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut by_impact = [0usize; 3];
        for e in &events {
            *by_type.entry(e.kind.as_str()).or_default() += 1;
            by_impact[e.impact as usize] += 1;
        }

        Ok(CanonicalResponse::ok(
            NATIVE,
            200,
            json!({
                "symbol": req.symbol(),
                "provider": NATIVE,
                "analysis": {
                    "kind": "headline",
                    "article_count": article_count,
                    "event_count": events.len(),
                    "event_breakdown": by_type,
                    "impact_breakdown": {
                        "high": by_impact[Impact::High as usize],
                        "medium": by_impact[Impact::Medium as usize],
                        "low": by_impact[Impact::Low as usize],
                    },
                    "highlights": highlights,
                },
                "timestamp": now_ts(),
            }),
        ))
    }

    async fn events(&self, req: &ContentRequest) -> Result<CanonicalResponse, NewswireError> {
        let events = classify_articles(self.fetch_articles(req).await?);
        Ok(CanonicalResponse::ok(
            NATIVE,
            200,
            json!({
                "symbol": req.symbol(),
                "provider": NATIVE,
                "count": events.len(),
                "events": events,
                "timestamp": now_ts(),
            }),
        ))
    }
}
