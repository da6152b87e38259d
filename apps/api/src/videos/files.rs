use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;

/// Creates the data, to-post and posted directories if missing.
pub async fn ensure_directories(config: &Config) -> Result<()> {
    for dir in [&config.to_post_dir, &config.posted_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating directory {}", dir.display()))?;
    }
    if let Some(parent) = config.data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}

/// Moves `source` into `posted_dir`, keeping its file name.
/// Returns `None` when the source does not exist.
pub async fn move_to_posted(source: &Path, posted_dir: &Path) -> Result<Option<PathBuf>> {
    if !tokio::fs::try_exists(source).await? {
        return Ok(None);
    }
    let name = source
        .file_name()
        .with_context(|| format!("{} has no file name", source.display()))?;
    tokio::fs::create_dir_all(posted_dir).await?;
    let destination = posted_dir.join(name);

    if tokio::fs::rename(source, &destination).await.is_err() {
        // rename fails across filesystems
        tokio::fs::copy(source, &destination)
            .await
            .with_context(|| format!("copying {} to {}", source.display(), destination.display()))?;
        tokio::fs::remove_file(source).await?;
    }

    info!("Moved {} to {}", source.display(), destination.display());
    Ok(Some(destination))
}
