use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

/// Read-only channel snapshot, live from YouTube or synthetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMetrics {
    pub channel_id: String,
    pub channel_name: String,
    pub total_subscribers: u64,
    pub total_views: u64,
    pub avg_retention_rate: f64,
    pub avg_click_through_rate: f64,
    pub avg_comments_per_video: f64,
    pub trending_topics: Vec<String>,
    pub sentiment_snapshot: SentimentSnapshot,
}
