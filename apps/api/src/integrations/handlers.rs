use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::integrations::assets::AssetsResponse;
use crate::integrations::trends::{TrendsResponse, DEFAULT_QUERY};
use crate::integrations::youtube::{ChannelMetricsResponse, YouTubeClient};
use crate::models::VideoItem;
use crate::state::AppState;
use crate::videos::lifecycle::{publish_video, PublishOptions};

#[derive(Deserialize)]
pub struct TrendingQuery {
    pub query: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct AssetSearchRequest {
    pub query: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRequest {
    pub channel_id: Option<String>,
}

/// Upload request. `description`, `tags` and `filePath` are accepted from
/// clients but unused while uploads are simulated.
#[derive(Deserialize)]
pub struct YouTubePublishRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Serialize)]
pub struct YouTubePublishResponse {
    pub message: &'static str,
    pub video: VideoItem,
}

/// GET /api/v1/trending?query=
pub async fn handle_trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingQuery>,
) -> Json<TrendsResponse> {
    // only a missing parameter falls back; `?query=` searches for ""
    let query = params.query.as_deref().unwrap_or(DEFAULT_QUERY);
    Json(state.trends.discover(query).await)
}

/// POST /api/v1/assets
pub async fn handle_assets(
    State(state): State<AppState>,
    Json(req): Json<AssetSearchRequest>,
) -> Json<AssetsResponse> {
    Json(state.assets.search(req.query.as_deref()).await)
}

/// POST /api/v1/youtube/channel
pub async fn handle_channel(
    State(state): State<AppState>,
    Json(req): Json<ChannelRequest>,
) -> Json<ChannelMetricsResponse> {
    Json(state.youtube.channel_metrics(req.channel_id.as_deref()).await)
}

/// POST /api/v1/youtube/publish
pub async fn handle_youtube_publish(
    State(state): State<AppState>,
    Json(req): Json<YouTubePublishRequest>,
) -> Result<Json<YouTubePublishResponse>, AppError> {
    let id = req.id.trim();
    if id.is_empty() {
        return Err(AppError::Validation("Video id is required".to_string()));
    }

    let title = req.title.trim();
    let options = PublishOptions {
        youtube_video_id: state
            .youtube
            .can_upload()
            .then(|| YouTubeClient::simulated_video_id(id)),
        analytics_topic: (!title.is_empty()).then(|| title.to_string()),
    };

    let video = publish_video(
        state.store.as_ref(),
        id,
        &state.config.posted_dir,
        options,
        Utc::now(),
    )
    .await?;

    Ok(Json(YouTubePublishResponse {
        message: state.youtube.publish_message(),
        video,
    }))
}
