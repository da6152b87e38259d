use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{VideoItem, VideoPatch, VideoStatus};
use crate::state::AppState;
use crate::videos::lifecycle::{
    create_video, delete_video, publish_video, run_due_schedule, update_video, PublishOptions,
    ScheduleReport,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    pub videos: Vec<VideoItem>,
    pub to_post: Vec<VideoItem>,
    pub posted: Vec<VideoItem>,
    pub scheduled: Vec<VideoItem>,
}

/// GET /api/v1/videos
pub async fn handle_list_videos(
    State(state): State<AppState>,
) -> Result<Json<VideoListResponse>, AppError> {
    let snapshot = state.store.snapshot().await?;
    Ok(Json(VideoListResponse {
        to_post: snapshot.with_status(VideoStatus::ToPost),
        posted: snapshot.with_status(VideoStatus::Posted),
        scheduled: snapshot.with_status(VideoStatus::Scheduled),
        videos: snapshot.videos,
    }))
}

/// POST /api/v1/videos
pub async fn handle_create_video(
    State(state): State<AppState>,
    Json(fields): Json<VideoPatch>,
) -> Result<(StatusCode, Json<VideoItem>), AppError> {
    let video = create_video(state.store.as_ref(), fields, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// PATCH /api/v1/videos/:id
pub async fn handle_update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<VideoPatch>,
) -> Result<Json<VideoItem>, AppError> {
    let video = update_video(state.store.as_ref(), &id, patch, Utc::now()).await?;
    Ok(Json(video))
}

/// DELETE /api/v1/videos/:id
pub async fn handle_delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    delete_video(state.store.as_ref(), &id).await?;
    Ok(Json(json!({ "ok": true })))
}

/// POST /api/v1/videos/:id/publish (alias: /mark-posted)
pub async fn handle_publish_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VideoItem>, AppError> {
    let video = publish_video(
        state.store.as_ref(),
        &id,
        &state.config.posted_dir,
        PublishOptions::default(),
        Utc::now(),
    )
    .await?;
    Ok(Json(video))
}

/// POST /api/v1/schedule/run
pub async fn handle_run_schedule(
    State(state): State<AppState>,
) -> Result<Json<ScheduleReport>, AppError> {
    let report = run_due_schedule(state.store.as_ref(), &state.config.posted_dir, Utc::now()).await?;
    Ok(Json(report))
}
