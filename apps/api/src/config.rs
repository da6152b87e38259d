use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_SEARCH_ENDPOINT: &str = "https://newsdata.io/api/1/news";
const DEFAULT_ASSET_SEARCH_ENDPOINT: &str = "https://api.pexels.com/videos/search";

/// Application configuration loaded from environment variables.
/// Every variable has a default; third-party keys are optional and their
/// absence switches the matching integration to curated fallback data.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_file: PathBuf,
    pub to_post_dir: PathBuf,
    pub posted_dir: PathBuf,
    pub schedule_interval_secs: u64,
    pub history_window: usize,
    pub search_api_key: Option<String>,
    pub search_api_endpoint: String,
    pub asset_search_key: Option<String>,
    pub asset_search_endpoint: String,
    pub youtube_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_file: path_env("DATA_FILE", "data/videos.json"),
            to_post_dir: path_env("TO_POST_FOLDER", "to_post"),
            posted_dir: path_env("POSTED_FOLDER", "posted"),
            schedule_interval_secs: std::env::var("SCHEDULE_INTERVAL_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("SCHEDULE_INTERVAL_SECS must be a whole number of seconds")?,
            history_window: std::env::var("HISTORY_WINDOW")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<usize>()
                .context("HISTORY_WINDOW must be a non-negative integer")?,
            search_api_key: optional_env("SEARCH_API_KEY"),
            search_api_endpoint: optional_env("SEARCH_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_SEARCH_ENDPOINT.to_string()),
            asset_search_key: optional_env("ASSET_SEARCH_KEY"),
            asset_search_endpoint: optional_env("ASSET_SEARCH_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ASSET_SEARCH_ENDPOINT.to_string()),
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
        })
    }

    /// Offline configuration rooted in `dir`: no API keys, default windows.
    #[cfg(test)]
    pub fn for_tests(dir: &std::path::Path) -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            data_file: dir.join("data").join("videos.json"),
            to_post_dir: dir.join("to_post"),
            posted_dir: dir.join("posted"),
            schedule_interval_secs: 30,
            history_window: 10,
            search_api_key: None,
            search_api_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            asset_search_key: None,
            asset_search_endpoint: DEFAULT_ASSET_SEARCH_ENDPOINT.to_string(),
            youtube_api_key: None,
        }
    }
}

/// Reads an optional variable, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn path_env(key: &str, default: &str) -> PathBuf {
    optional_env(key)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
