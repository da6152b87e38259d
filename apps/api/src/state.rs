use std::sync::Arc;

use crate::config::Config;
use crate::integrations::assets::AssetClient;
use crate::integrations::trends::TrendClient;
use crate::integrations::youtube::YouTubeClient;
use crate::store::VideoStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: JsonFileStore over `DATA_FILE`.
    pub store: Arc<dyn VideoStore>,
    pub trends: TrendClient,
    pub assets: AssetClient,
    pub youtube: YouTubeClient,
    pub config: Config,
}

impl AppState {
    /// Wires the integration clients from `config` around an existing store.
    pub fn new(config: Config, store: Arc<dyn VideoStore>, http: reqwest::Client) -> Self {
        Self {
            store,
            trends: TrendClient::new(
                http.clone(),
                config.search_api_key.clone(),
                config.search_api_endpoint.clone(),
            ),
            assets: AssetClient::new(
                http.clone(),
                config.asset_search_key.clone(),
                config.asset_search_endpoint.clone(),
            ),
            youtube: YouTubeClient::new(http, config.youtube_api_key.clone()),
            config,
        }
    }
}
