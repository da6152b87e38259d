#![cfg(test)]

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{VideoItem, VideoPatch};
use crate::store::{StoreError, StoreSnapshot, VideoStore};

/// In-memory store with the same semantics as `JsonFileStore`. Test-only.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<StoreSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: Mutex::new(snapshot),
        }
    }
}

#[async_trait]
impl VideoStore for MemoryStore {
    async fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        Ok(self.inner.lock().await.clone())
    }

    async fn append(&self, video: VideoItem) -> Result<VideoItem, StoreError> {
        self.inner.lock().await.append(video.clone());
        Ok(video)
    }

    async fn update(&self, id: &str, patch: VideoPatch) -> Result<Option<VideoItem>, StoreError> {
        Ok(self.inner.lock().await.update(id, patch))
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.lock().await.remove(id))
    }
}
