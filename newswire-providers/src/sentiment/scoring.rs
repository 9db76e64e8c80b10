//! Pure scoring rules over a sample of social posts.

use std::collections::BTreeSet;

use serde::Serialize;

use super::post::SentimentPost;
use super::vocabulary::Bucket;

const TREND_WINDOW: usize = 5;

/// Share of each canonical label in a sample, in percent with one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Distribution {
    /// Percent of posts in the up bucket.
    pub positive: f64,
    /// Percent of posts in the flat bucket.
    pub neutral: f64,
    /// Percent of posts in the down bucket.
    pub negative: f64,
}

impl Distribution {
    /// Sum of the three shares. Roughly 100 for a non-empty sample, 0 otherwise.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

/// How split a sample is across buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    /// All three buckets occur.
    High,
    /// Exactly two buckets occur.
    Medium,
    /// One bucket, or no posts.
    Low,
}

/// Direction of positive sentiment over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// More positive posts in the newest window than the oldest.
    Improving,
    /// Fewer positive posts in the newest window than the oldest.
    Declining,
    /// Both windows hold the same number of positive posts.
    Stable,
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

fn count(posts: &[SentimentPost], bucket: Bucket) -> usize {
    posts.iter().filter(|p| p.bucket == bucket).count()
}

/// Bucket shares of `posts`; all zero for an empty sample.
#[must_use]
pub fn distribution(posts: &[SentimentPost]) -> Distribution {
    let total = posts.len();
    Distribution {
        positive: percent(count(posts, Bucket::Up), total),
        neutral: percent(count(posts, Bucket::Flat), total),
        negative: percent(count(posts, Bucket::Down), total),
    }
}

/// Confidence of a mood index: distance from the midpoint, scaled.
#[must_use]
pub fn confidence(mood_index: f64) -> f64 {
    (0.5 + 2.0 * (mood_index - 0.5).abs()).min(1.0)
}

/// Mood index estimated from the sample itself; 0.5 when there is nothing to go on.
#[must_use]
pub fn derived_mood_index(posts: &[SentimentPost]) -> f64 {
    if posts.is_empty() {
        return 0.5;
    }
    let up = count(posts, Bucket::Up) as f64;
    let flat = count(posts, Bucket::Flat) as f64;
    (up + 0.5 * flat) / posts.len() as f64
}

/// Volatility from the number of distinct buckets present.
#[must_use]
pub fn volatility(posts: &[SentimentPost]) -> Volatility {
    match posts.iter().map(|p| p.bucket).collect::<BTreeSet<_>>().len() {
        n if n >= 3 => Volatility::High,
        2 => Volatility::Medium,
        _ => Volatility::Low,
    }
}

/// Compare positive posts among the most recent and the oldest five.
#[must_use]
pub fn trend(posts: &[SentimentPost]) -> Trend {
    let mut by_recency: Vec<&SentimentPost> = posts.iter().collect();
    by_recency.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let positives = |window: &[&SentimentPost]| {
        window.iter().filter(|p| p.bucket == Bucket::Up).count()
    };
    let recent = positives(&by_recency[..by_recency.len().min(TREND_WINDOW)]);
    let older = positives(&by_recency[by_recency.len().saturating_sub(TREND_WINDOW)..]);
    match recent.cmp(&older) {
        std::cmp::Ordering::Greater => Trend::Improving,
        std::cmp::Ordering::Less => Trend::Declining,
        std::cmp::Ordering::Equal => Trend::Stable,
    }
}

/// Ranking weight for key posts: polarity, breadth and length.
#[must_use]
pub fn significance(post: &SentimentPost) -> f64 {
    let mut score = 0.0;
    if !post.is_neutral() {
        score += 0.5;
    }
    score += 0.1 * post.securities.len() as f64;
    score += 0.05 * post.sectors.len() as f64;
    if post.content.chars().count() > 100 {
        score += 0.2;
    }
    score
}

/// Top `n` posts by significance, most significant first.
#[must_use]
pub fn key_posts(posts: &[SentimentPost], n: usize) -> Vec<&SentimentPost> {
    let mut ranked: Vec<&SentimentPost> = posts.iter().collect();
    ranked.sort_by(|a, b| significance(b).total_cmp(&significance(a)));
    ranked.truncate(n);
    ranked
}

/// Engagement estimate in `[0.5, 1]` from length and breadth.
#[must_use]
pub fn engagement(post: &SentimentPost) -> f64 {
    let mut score: f64 = 0.5;
    if post.content.chars().count() > 200 {
        score += 0.2;
    }
    if !post.securities.is_empty() {
        score += 0.1;
    }
    if !post.sectors.is_empty() {
        score += 0.1;
    }
    score.min(1.0)
}

/// Virality estimate in `[0.3, 1]` from the securities and sectors touched.
#[must_use]
pub fn virality(post: &SentimentPost) -> f64 {
    (0.3 + 0.1 * post.securities.len() as f64 + 0.05 * post.sectors.len() as f64).min(1.0)
}

/// A non-neutral post touching more than two securities or more than one sector.
#[must_use]
pub fn is_social_event(post: &SentimentPost) -> bool {
    !post.is_neutral() && (post.securities.len() > 2 || post.sectors.len() > 1)
}

/// Number of backend pages to pull for a timeframe.
#[must_use]
pub fn pages_for_timeframe(timeframe: &str) -> u32 {
    match timeframe {
        "1h" => 1,
        "1d" => 2,
        "7d" => 10,
        "30d" => 30,
        _ => 5,
    }
}
