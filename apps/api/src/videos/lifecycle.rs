//! Status transitions for tracked videos.
//!
//! Analytics are synthesized here and nowhere else, and only when the stored
//! record has none. The store re-checks that under its own lock, so two
//! concurrent publishes cannot both attach analytics. Every function takes
//! `now` so tests can pin the clock.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::generate_analytics;
use crate::errors::AppError;
use crate::models::{VideoItem, VideoPatch, VideoStatus};
use crate::store::VideoStore;
use crate::videos::files::move_to_posted;

pub const UNTITLED_TOPIC: &str = "Untitled Short";

const NAIVE_SCHEDULE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Extra inputs for a publish that did not come from the stored record.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    pub youtube_video_id: Option<String>,
    /// When set, missing analytics are seeded from `{id, topic}` instead of the full record.
    pub analytics_topic: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub processed: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Video {id} not found"))
}

async fn require(store: &dyn VideoStore, id: &str) -> Result<VideoItem, AppError> {
    store.get(id).await?.ok_or_else(|| not_found(id))
}

/// Stores a new video built from a partial record.
pub async fn create_video(
    store: &dyn VideoStore,
    fields: VideoPatch,
    now: DateTime<Utc>,
) -> Result<VideoItem, AppError> {
    let mut video = VideoItem::new(Uuid::new_v4().to_string(), UNTITLED_TOPIC, now);
    fields.apply_to(&mut video);

    if video.status == VideoStatus::Posted {
        video.published_at = Some(now);
        if video.analytics.is_none() {
            video.analytics = Some(generate_analytics(&video));
        }
    }

    let video = store.append(video).await?;
    info!("Created video {} ({:?})", video.id, video.status);
    Ok(video)
}

/// Merges `patch` into an existing video.
pub async fn update_video(
    store: &dyn VideoStore,
    id: &str,
    mut patch: VideoPatch,
    now: DateTime<Utc>,
) -> Result<VideoItem, AppError> {
    let current = require(store, id).await?;

    if current.analytics.is_some() {
        patch.analytics = None;
    }

    if patch.status == Some(VideoStatus::Posted) {
        let mut merged = current.clone();
        patch.clone().apply_to(&mut merged);
        if merged.published_at.is_none() {
            patch.published_at = Some(now);
        }
        if merged.analytics.is_none() {
            patch.analytics = Some(generate_analytics(&merged));
        }
    }

    store.update(id, patch).await?.ok_or_else(|| not_found(id))
}

/// Marks a video posted, then moves its file into `posted_dir` when one exists.
///
/// The status write comes first. A file is only moved for a record that is
/// already posted, and a failed move or path update leaves the publish intact.
pub async fn publish_video(
    store: &dyn VideoStore,
    id: &str,
    posted_dir: &Path,
    options: PublishOptions,
    now: DateTime<Utc>,
) -> Result<VideoItem, AppError> {
    let current = require(store, id).await?;

    let mut patch = VideoPatch {
        status: Some(VideoStatus::Posted),
        published_at: Some(now),
        youtube_video_id: options.youtube_video_id,
        ..Default::default()
    };

    if current.analytics.is_none() {
        let basis = match options.analytics_topic {
            Some(topic) => VideoItem::new(current.id.clone(), topic, current.created_at),
            None => current,
        };
        patch.analytics = Some(generate_analytics(&basis));
    }

    let video = store.update(id, patch).await?.ok_or_else(|| not_found(id))?;
    info!("Published video {id}");

    let Some(file_path) = video.file_path.clone() else {
        return Ok(video);
    };
    let destination = match move_to_posted(Path::new(&file_path), posted_dir).await {
        Ok(Some(destination)) => destination.display().to_string(),
        Ok(None) => return Ok(video),
        Err(e) => {
            warn!("Could not move {file_path} for video {id}: {e:#}");
            return Ok(video);
        }
    };

    let moved = VideoPatch {
        file_path: Some(destination.clone()),
        ..Default::default()
    };
    match store.update(id, moved).await {
        Ok(Some(updated)) => Ok(updated),
        Ok(None) => {
            warn!("Video {id} was removed after publishing; its file is now at {destination}");
            Ok(video)
        }
        Err(e) => {
            warn!("Moved {file_path} to {destination} but could not record it for video {id}: {e}");
            Ok(video)
        }
    }
}

/// Removes a video from the active list. Unknown ids are not an error.
pub async fn delete_video(store: &dyn VideoStore, id: &str) -> Result<bool, AppError> {
    let removed = store.remove(id).await?;
    if removed {
        info!("Deleted video {id}");
    }
    Ok(removed)
}

/// Parses a `scheduledFor` value. Offset-less datetimes are read as UTC.
pub fn parse_scheduled_for(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_SCHEDULE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn is_due(video: &VideoItem, now: DateTime<Utc>) -> bool {
    video.status == VideoStatus::Scheduled
        && video
            .scheduled_for
            .as_deref()
            .and_then(parse_scheduled_for)
            .is_some_and(|at| at <= now)
}

/// Publishes every scheduled video whose time has come.
pub async fn run_due_schedule(
    store: &dyn VideoStore,
    posted_dir: &Path,
    now: DateTime<Utc>,
) -> Result<ScheduleReport, AppError> {
    let snapshot = store.snapshot().await?;
    let due: Vec<String> = snapshot
        .videos
        .iter()
        .filter(|v| is_due(v, now))
        .map(|v| v.id.clone())
        .collect();

    let mut processed = Vec::with_capacity(due.len());
    for id in due {
        match publish_video(store, &id, posted_dir, PublishOptions::default(), now).await {
            Ok(_) => processed.push(id),
            // deleted between snapshot and publish
            Err(AppError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(ScheduleReport {
        processed,
        timestamp: now,
    })
}
