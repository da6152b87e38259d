//! External integrations: trend search, stock-asset search, YouTube.
//!
//! RULE: every client fails soft. Missing credentials or any upstream error
//! is logged and answered with curated fallback data; `UpstreamError` never
//! reaches a handler.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod assets;
pub mod handlers;
pub mod trends;
pub mod youtube;

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Upstream returned no usable data: {0}")]
    Empty(&'static str),
}

/// Builds the HTTP client shared by all integration clients.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Sends `request`, rejects non-2xx statuses, and decodes the JSON body.
async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, UpstreamError> {
    let response = request.header("accept", "application/json").send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}

/// ISO-8601 UTC timestamp with millisecond precision, as browsers print it.
pub fn iso_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
