use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::{VideoItem, VideoPatch};
use crate::store::{StoreError, StoreSnapshot, VideoStore};

/// File-backed store: `{ "videos": [...], "history": [...] }`, pretty-printed.
///
/// Every mutation is a full read-modify-write. The mutex serialises those
/// cycles within this process only; other writers to the same file still race
/// (last write wins).
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating parent directories and an empty
    /// store file if needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        if !tokio::fs::try_exists(&path).await? {
            info!("Creating empty video store at {}", path.display());
            write_atomically(path.clone(), &StoreSnapshot::default()).await?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<StoreSnapshot, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn mutate<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut StoreSnapshot) -> T + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;
        let mut snapshot = self.read().await?;
        let out = f(&mut snapshot);
        write_atomically(self.path.clone(), &snapshot).await?;
        debug!(
            "Store written: {} videos, {} history",
            snapshot.videos.len(),
            snapshot.history.len()
        );
        Ok(out)
    }
}

/// Writes to a sibling temp file, then renames it over `path`.
async fn write_atomically(path: PathBuf, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
    let body = serde_json::to_string_pretty(snapshot)?;
    tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(body.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    })
    .await?
}

#[async_trait]
impl VideoStore for JsonFileStore {
    async fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn append(&self, video: VideoItem) -> Result<VideoItem, StoreError> {
        let stored = video.clone();
        self.mutate(move |s| s.append(video)).await?;
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: VideoPatch) -> Result<Option<VideoItem>, StoreError> {
        self.mutate(move |s| s.update(id, patch)).await
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        self.mutate(move |s| s.remove(id)).await
    }
}
