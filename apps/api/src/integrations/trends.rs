//! Trend discovery via a news-search API, with a curated fallback set.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::integrations::{fetch_json, iso_now, UpstreamError};
use crate::models::TrendResult;

pub const DEFAULT_QUERY: &str = "YouTube Shorts trends";
const MAX_LIVE_TRENDS: usize = 6;
const PAGE_SIZE: &str = "8";
const DEFAULT_SUMMARY: &str = "Live search result transformed into Shorts-friendly insight.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendSource {
    LiveSearch,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendsResponse {
    pub source: TrendSource,
    pub trends: Vec<TrendResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Curated fallback
// ────────────────────────────────────────────────────────────────────────────

/// The five curated trends, stamped with `now`.
pub fn default_trends(now: &str) -> Vec<TrendResult> {
    let curated: [(&str, u8, &str, [&str; 2]); 5] = [
        (
            "AI-powered Shorts editing tricks",
            91,
            "Creators are showcasing automated editing workflows that cut production time in half.",
            ["creator-tools", "ai"],
        ),
        (
            "Viral Reddit story dramatizations",
            86,
            "Animated or acted Reddit confessions keep outperforming traditional storytelling formats.",
            ["storytelling", "drama"],
        ),
        (
            "Realistic NPC livestream crossovers",
            83,
            "NPC style performances spilling into Shorts with cosplay and interaction challenges.",
            ["livestream", "npc-trend"],
        ),
        (
            "Budget cinematic transitions",
            88,
            "Low-cost lighting hacks and free transitions packs going viral among Shorts filmmakers.",
            ["filmmaking", "transitions"],
        ),
        (
            "Micro-learning business tips",
            84,
            "Creators packaging finance and marketing advice into 30-second actionable bites.",
            ["business", "education"],
        ),
    ];

    curated
        .iter()
        .map(|(keyword, score, summary, categories)| TrendResult {
            keyword: keyword.to_string(),
            interest_score: *score,
            summary: summary.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            last_updated: now.to_string(),
        })
        .collect()
}

/// Curated trends whose keyword contains `query` (case-insensitive); all of
/// them when nothing matches.
pub fn fallback_for_query(query: &str, now: &str) -> Vec<TrendResult> {
    let needle = query.to_lowercase();
    let all = default_trends(now);
    let matching: Vec<TrendResult> = all
        .iter()
        .filter(|t| t.keyword.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    if matching.is_empty() {
        all
    } else {
        matching
    }
}

// ────────────────────────────────────────────────────────────────────────────
// News search payload
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct NewsPayload {
    results: Option<Vec<NewsItem>>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    title: Option<String>,
    description: Option<String>,
    category: Option<OneOrMany>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Maps a news-search payload to at most `MAX_LIVE_TRENDS` trends.
/// A payload without `results` yields the curated set.
fn shape_news(payload: NewsPayload, now: &str) -> Vec<TrendResult> {
    let Some(results) = payload.results else {
        return default_trends(now);
    };

    results
        .into_iter()
        .take(MAX_LIVE_TRENDS)
        .enumerate()
        .map(|(index, item)| TrendResult {
            keyword: item
                .title
                .unwrap_or_else(|| format!("Trending idea {}", index + 1)),
            interest_score: 70 + (index % 5) as u8 * 5,
            summary: item
                .description
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            categories: match item.category {
                Some(OneOrMany::Many(list)) => list,
                Some(OneOrMany::One(single)) => vec![single],
                None => vec!["creator".to_string()],
            },
            last_updated: item.pub_date.unwrap_or_else(|| now.to_string()),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct TrendClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl TrendClient {
    pub fn new(client: Client, api_key: Option<String>, endpoint: String) -> Self {
        Self {
            client,
            api_key,
            endpoint,
        }
    }

    /// Live search when a key is configured, curated trends otherwise or on failure.
    pub async fn discover(&self, query: &str) -> TrendsResponse {
        let now = iso_now();
        let Some(api_key) = self.api_key.as_deref() else {
            return TrendsResponse {
                source: TrendSource::Fallback,
                trends: fallback_for_query(query, &now),
                message: Some(
                    "Using curated trending data. Set SEARCH_API_KEY to enable live web search."
                        .to_string(),
                ),
            };
        };

        match self.fetch_live(api_key, query, &now).await {
            Ok(trends) => {
                info!("Trend search returned {} results for '{query}'", trends.len());
                TrendsResponse {
                    source: TrendSource::LiveSearch,
                    trends,
                    message: None,
                }
            }
            Err(e) => {
                warn!("Trend search failed, serving curated fallback: {e}");
                TrendsResponse {
                    source: TrendSource::Fallback,
                    trends: fallback_for_query(query, &now),
                    message: Some("Live search failed, using cached suggestions.".to_string()),
                }
            }
        }
    }

    async fn fetch_live(
        &self,
        api_key: &str,
        query: &str,
        now: &str,
    ) -> Result<Vec<TrendResult>, UpstreamError> {
        let request = self.client.get(&self.endpoint).query(&[
            ("apikey", api_key),
            ("q", query),
            ("language", "en"),
            ("category", "entertainment"),
            ("size", PAGE_SIZE),
        ]);
        let payload: NewsPayload = fetch_json(request).await?;
        Ok(shape_news(payload, now))
    }
}
