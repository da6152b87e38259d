use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::store::VideoStore;
use crate::videos::lifecycle::run_due_schedule;

/// Spawns the background publisher. The first pass runs immediately, then
/// once every `interval_secs`. Failures are logged and the loop carries on.
pub fn spawn_scheduler(
    store: Arc<dyn VideoStore>,
    posted_dir: PathBuf,
    interval_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            ticker.tick().await;
            match run_due_schedule(store.as_ref(), &posted_dir, chrono::Utc::now()).await {
                Ok(report) if !report.processed.is_empty() => {
                    info!(
                        target: "scheduler",
                        published = report.processed.len(),
                        "published scheduled videos"
                    );
                }
                Ok(_) => {}
                Err(e) => error!(target: "scheduler", "scheduled publish pass failed: {e}"),
            }
        }
    })
}
