//! Video Store: pluggable persistence for tracked videos and posted history.
//!
//! Default: `JsonFileStore` (one JSON file rewritten wholesale per mutation).
//! Tests: `MemoryStore`.
//!
//! `AppState` holds an `Arc<dyn VideoStore>`, so handlers never touch the filesystem.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{VideoItem, VideoPatch, VideoStatus};

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
#[cfg(test)]
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Full contents of the store: active videos plus the posted history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub videos: Vec<VideoItem>,
    #[serde(default)]
    pub history: Vec<VideoItem>,
}

impl StoreSnapshot {
    /// The last `limit` history entries, oldest first.
    pub fn recent_history(&self, limit: usize) -> &[VideoItem] {
        let start = self.history.len().saturating_sub(limit);
        &self.history[start..]
    }

    pub fn with_status(&self, status: VideoStatus) -> Vec<VideoItem> {
        self.videos
            .iter()
            .filter(|v| v.status == status)
            .cloned()
            .collect()
    }

    fn append(&mut self, video: VideoItem) {
        self.videos.push(video.clone());
        self.record_posted(&video);
    }

    /// Analytics already attached are kept; a patch can only fill them in.
    fn update(&mut self, id: &str, mut patch: VideoPatch) -> Option<VideoItem> {
        let video = self.videos.iter_mut().find(|v| v.id == id)?;
        if video.analytics.is_some() {
            patch.analytics = None;
        }
        patch.apply_to(video);
        let updated = video.clone();
        self.record_posted(&updated);
        Some(updated)
    }

    /// Removes from the active list only; history keeps its copy.
    fn remove(&mut self, id: &str) -> bool {
        let before = self.videos.len();
        self.videos.retain(|v| v.id != id);
        self.videos.len() != before
    }

    /// Copies a posted video into history the first time it is seen posted.
    fn record_posted(&mut self, video: &VideoItem) {
        if video.status == VideoStatus::Posted && !self.history.iter().any(|h| h.id == video.id) {
            self.history.push(video.clone());
        }
    }
}

/// The storage trait. Implement this to swap backends without touching
/// handlers or lifecycle code.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Read-all.
    async fn snapshot(&self) -> Result<StoreSnapshot, StoreError>;

    async fn append(&self, video: VideoItem) -> Result<VideoItem, StoreError>;

    /// Merges `patch` into the video with `id`. `None` if no such video.
    async fn update(&self, id: &str, patch: VideoPatch) -> Result<Option<VideoItem>, StoreError>;

    /// Deletes from the active list. Returns whether anything was removed.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<VideoItem>, StoreError> {
        Ok(self.snapshot().await?.videos.into_iter().find(|v| v.id == id))
    }
}
