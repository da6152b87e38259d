use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::integrations::iso_now;
use crate::models::VideoStatus;
use crate::state::AppState;

/// GET /health
/// Returns service status plus a count of tracked videos by status.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let snapshot = state.store.snapshot().await?;
    let count = |status: VideoStatus| snapshot.videos.iter().filter(|v| v.status == status).count();

    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "shorts-api",
        "videos": {
            "total": snapshot.videos.len(),
            "toPost": count(VideoStatus::ToPost),
            "scheduled": count(VideoStatus::Scheduled),
            "posted": count(VideoStatus::Posted),
        },
        "history": snapshot.history.len(),
        "timestamp": iso_now()
    })))
}
