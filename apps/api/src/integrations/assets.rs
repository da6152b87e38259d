//! Stock-asset search (Pexels video search) with curated defaults.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::integrations::{fetch_json, UpstreamError};
use crate::models::{AssetSuggestion, AssetType};

const PER_PAGE: &str = "6";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetsResponse {
    pub source: AssetSource,
    pub assets: Vec<AssetSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn fallback_assets() -> Vec<AssetSuggestion> {
    vec![
        AssetSuggestion {
            id: "hook-crowd-reaction".to_string(),
            asset_type: AssetType::StockVideo,
            title: "Crowd cheering reaction loop".to_string(),
            source: "Pexels".to_string(),
            url: Some("https://www.pexels.com/video/8193668/".to_string()),
            thumbnail: Some(
                "https://images.pexels.com/photos/8193668/pexels-photo-8193668.jpeg?auto=compress&cs=tinysrgb&h=120"
                    .to_string(),
            ),
        },
        AssetSuggestion {
            id: "beat-riser".to_string(),
            asset_type: AssetType::Music,
            title: "Modern trap riser (StockTune)".to_string(),
            source: "Pixabay Music".to_string(),
            url: Some("https://pixabay.com/music/beats-hip-hop-11254/".to_string()),
            thumbnail: None,
        },
        AssetSuggestion {
            id: "template-flash-cut".to_string(),
            asset_type: AssetType::Template,
            title: "Flash-cut Shorts template (Canva)".to_string(),
            source: "Canva".to_string(),
            url: Some("https://www.canva.com/templates/EAE7wzgieSo/".to_string()),
            thumbnail: None,
        },
    ]
}

#[derive(Debug, Deserialize)]
struct PexelsPayload {
    videos: Option<Vec<PexelsVideo>>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    id: u64,
    url: String,
    image: String,
}

fn shape_pexels(payload: PexelsPayload) -> Vec<AssetSuggestion> {
    let Some(videos) = payload.videos else {
        return fallback_assets();
    };
    videos
        .into_iter()
        .map(|v| AssetSuggestion {
            id: format!("pexels-{}", v.id),
            asset_type: AssetType::StockVideo,
            title: format!("Pexels asset #{}", v.id),
            source: "Pexels".to_string(),
            url: Some(v.url),
            thumbnail: Some(v.image),
        })
        .collect()
}

#[derive(Clone)]
pub struct AssetClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl AssetClient {
    pub fn new(client: Client, api_key: Option<String>, endpoint: String) -> Self {
        Self {
            client,
            api_key,
            endpoint,
        }
    }

    pub async fn search(&self, query: Option<&str>) -> AssetsResponse {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let (Some(api_key), Some(query)) = (self.api_key.as_deref(), query) else {
            return AssetsResponse {
                source: AssetSource::Fallback,
                assets: fallback_assets(),
                message: Some(
                    "Returning curated stock assets. Provide ASSET_SEARCH_KEY to fetch live templates."
                        .to_string(),
                ),
            };
        };

        match self.fetch_live(api_key, query).await {
            Ok(assets) => AssetsResponse {
                source: AssetSource::Live,
                assets,
                message: None,
            },
            Err(e) => {
                warn!("Asset search failed, serving curated defaults: {e}");
                AssetsResponse {
                    source: AssetSource::Fallback,
                    assets: fallback_assets(),
                    message: Some(
                        "Asset provider unavailable. Displaying curated defaults.".to_string(),
                    ),
                }
            }
        }
    }

    async fn fetch_live(&self, api_key: &str, query: &str) -> Result<Vec<AssetSuggestion>, UpstreamError> {
        let request = self
            .client
            .get(&self.endpoint)
            .header("authorization", api_key)
            .query(&[("query", query), ("per_page", PER_PAGE)]);
        let payload: PexelsPayload = fetch_json(request).await?;
        Ok(shape_pexels(payload))
    }
}
