use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::integrations::iso_now;
use crate::integrations::trends::default_trends;
use crate::models::{ChannelMetrics, TrendResult};
use crate::recommendations::engine::{build_recommendations, RecommendationResponse};
use crate::state::AppState;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub channel_metrics: Option<ChannelMetrics>,
    pub trends: Option<Vec<TrendResult>>,
    pub history_limit: Option<usize>,
}

/// POST /api/v1/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let trends = req.trends.unwrap_or_else(|| default_trends(&iso_now()));
    let limit = req.history_limit.unwrap_or(state.config.history_window);

    let snapshot = state.store.snapshot().await?;
    let history = snapshot.recent_history(limit);

    Ok(Json(build_recommendations(
        &trends,
        history,
        req.channel_metrics.as_ref(),
    )))
}
