pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::integrations::handlers as integrations;
use crate::recommendations::handlers as recommendations;
use crate::state::AppState;
use crate::videos::handlers as videos;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Videos
        .route(
            "/api/v1/videos",
            get(videos::handle_list_videos).post(videos::handle_create_video),
        )
        .route(
            "/api/v1/videos/:id",
            patch(videos::handle_update_video).delete(videos::handle_delete_video),
        )
        .route(
            "/api/v1/videos/:id/publish",
            post(videos::handle_publish_video),
        )
        .route(
            "/api/v1/videos/:id/mark-posted",
            post(videos::handle_publish_video),
        )
        .route("/api/v1/schedule/run", post(videos::handle_run_schedule))
        // Ideas
        .route(
            "/api/v1/recommendations",
            post(recommendations::handle_recommendations),
        )
        .route("/api/v1/trending", get(integrations::handle_trending))
        .route("/api/v1/assets", post(integrations::handle_assets))
        // YouTube
        .route(
            "/api/v1/youtube/channel",
            post(integrations::handle_channel),
        )
        .route(
            "/api/v1/youtube/publish",
            post(integrations::handle_youtube_publish),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt as _;

    use super::*;
    use crate::config::Config;
    use crate::store::{MemoryStore, VideoStore};

    const BODY_LIMIT: usize = 1024 * 1024;

    fn test_app() -> (Router, Arc<dyn VideoStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn VideoStore> = Arc::new(MemoryStore::new());
        let state = AppState::new(Config::for_tests(dir.path()), store.clone(), reqwest::Client::new());
        (build_router(state), store, dir)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let (app, _store, _dir) = test_app();
        send(&app, "POST", "/api/v1/videos", Some(json!({ "topic": "One" }))).await;

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "shorts-api");
        assert_eq!(body["videos"]["total"], 1);
        assert_eq!(body["videos"]["toPost"], 1);
    }

    #[tokio::test]
    async fn test_create_then_list_groups_by_status() {
        let (app, _store, _dir) = test_app();

        let (status, created) = send(
            &app,
            "POST",
            "/api/v1/videos",
            Some(json!({ "topic": "Budget lighting", "status": "scheduled", "scheduledFor": "2030-01-01T10:00" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["topic"], "Budget lighting");
        assert_eq!(created["hookScore"], 75);
        assert!(created.get("analytics").is_none());

        send(&app, "POST", "/api/v1/videos", Some(json!({}))).await;

        let (status, list) = send(&app, "GET", "/api/v1/videos", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["videos"].as_array().unwrap().len(), 2);
        assert_eq!(list["scheduled"].as_array().unwrap().len(), 1);
        assert_eq!(list["toPost"][0]["topic"], "Untitled Short");
        assert!(list["posted"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_patch_unknown_video_is_404() {
        let (app, _store, _dir) = test_app();
        let (status, body) = send(&app, "PATCH", "/api/v1/videos/nope", Some(json!({ "caption": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_mark_posted_then_delete_keeps_history() {
        let (app, store, _dir) = test_app();
        let (_, created) = send(&app, "POST", "/api/v1/videos", Some(json!({ "topic": "Desk tour" }))).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, posted) = send(&app, "POST", &format!("/api/v1/videos/{id}/mark-posted"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(posted["status"], "posted");
        assert!(posted["analytics"]["retentionRate"].is_number());

        let (status, body) = send(&app, "DELETE", &format!("/api/v1/videos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let snap = store.snapshot().await.unwrap();
        assert!(snap.videos.is_empty());
        assert_eq!(snap.history.len(), 1);
    }

    #[tokio::test]
    async fn test_schedule_run_reports_processed_ids() {
        let (app, _store, _dir) = test_app();
        let (_, created) = send(
            &app,
            "POST",
            "/api/v1/videos",
            Some(json!({ "status": "scheduled", "scheduledFor": "2020-01-01T00:00:00Z" })),
        )
        .await;

        let (status, report) = send(&app, "POST", "/api/v1/schedule/run", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["processed"], json!([created["id"]]));
        assert!(report["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_recommendations_default_to_curated_trends() {
        let (app, _store, _dir) = test_app();
        let (status, body) = send(&app, "POST", "/api/v1/recommendations", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
        assert_eq!(
            body["recommendations"][0]["title"],
            "Why AI-powered Shorts editing tricks Is Exploding Right Now"
        );
        assert!(body["rationale"].is_string());
    }

    #[tokio::test]
    async fn test_recommendations_skip_covered_history() {
        let (app, _store, _dir) = test_app();
        send(
            &app,
            "POST",
            "/api/v1/videos",
            Some(json!({ "topic": "My take on budget cinematic transitions", "status": "posted" })),
        )
        .await;

        let (_, body) = send(&app, "POST", "/api/v1/recommendations", Some(json!({}))).await;
        let titles: Vec<&str> = body["recommendations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles.len(), 4);
        assert!(titles.iter().all(|t| !t.contains("Budget cinematic transitions")));
    }

    #[tokio::test]
    async fn test_trending_without_key_is_fallback() {
        let (app, _store, _dir) = test_app();
        let (status, body) = send(&app, "GET", "/api/v1/trending?query=npc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["trends"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_trending_empty_query_matches_every_curated_trend() {
        let (app, _store, _dir) = test_app();

        let (_, empty) = send(&app, "GET", "/api/v1/trending?query=", None).await;
        assert_eq!(empty["source"], "fallback");
        assert_eq!(empty["trends"].as_array().unwrap().len(), 5);

        let (_, missing) = send(&app, "GET", "/api/v1/trending", None).await;
        assert_eq!(missing["trends"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_youtube_publish_validates_and_simulates() {
        let (app, _store, _dir) = test_app();

        let (status, body) = send(&app, "POST", "/api/v1/youtube/publish", Some(json!({ "title": "t" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/youtube/publish",
            Some(json!({ "id": "missing", "title": "t", "description": "d" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, created) = send(&app, "POST", "/api/v1/videos", Some(json!({ "topic": "Gear" }))).await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/youtube/publish",
            Some(json!({ "id": created["id"], "title": "Gear", "description": "d", "tags": ["a"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().starts_with("Simulated upload"));
        assert_eq!(body["video"]["status"], "posted");
        assert!(body["video"].get("youtubeVideoId").is_none());
    }

    #[tokio::test]
    async fn test_channel_and_assets_fall_back_without_keys() {
        let (app, _store, _dir) = test_app();

        let (_, channel) = send(&app, "POST", "/api/v1/youtube/channel", Some(json!({ "channelId": "UC1" }))).await;
        assert_eq!(channel["live"], false);
        assert_eq!(channel["metrics"]["channelName"], "Creator Shorts Lab");

        let (_, assets) = send(&app, "POST", "/api/v1/assets", Some(json!({ "query": "city" }))).await;
        assert_eq!(assets["source"], "fallback");
        assert_eq!(assets["assets"].as_array().unwrap().len(), 3);
    }
}
