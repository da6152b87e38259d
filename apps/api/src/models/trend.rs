use serde::{Deserialize, Serialize};

/// A topic of current audience interest, live or curated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub keyword: String,
    pub interest_score: u8, // 0 – 100
    pub summary: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Provider timestamp as received; news feeds do not agree on a format.
    pub last_updated: String,
}
