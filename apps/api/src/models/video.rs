use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle position of a tracked Short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    #[default]
    ToPost,
    Scheduled,
    Posted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropOffMoment {
    /// Seconds into the video.
    pub timestamp: u32,
    pub description: String,
}

/// Synthesized post-publish analytics. Attached once per video, never regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalytics {
    pub average_view_duration: f64,
    pub retention_rate: f64,
    pub click_through_rate: f64,
    pub comments_summary: String,
    pub drop_off_moments: Vec<DropOffMoment>,
    pub improvement_ideas: Vec<String>,
}

/// A Short tracked through to_post → scheduled → posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub thumbnail_prompt: String,
    #[serde(default = "default_hook_score")]
    pub hook_score: u8,
    #[serde(default)]
    pub retention_notes: Vec<String>,
    #[serde(default)]
    pub status: VideoStatus,
    /// Kept as supplied: form inputs often omit the UTC offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<VideoAnalytics>,
}

pub fn default_hook_score() -> u8 {
    75
}

impl VideoItem {
    /// Minimal record with defaults for every optional field.
    pub fn new(id: impl Into<String>, topic: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            description: String::new(),
            caption: String::new(),
            thumbnail_prompt: String::new(),
            hook_score: default_hook_score(),
            retention_notes: Vec::new(),
            status: VideoStatus::ToPost,
            scheduled_for: None,
            created_at,
            published_at: None,
            youtube_video_id: None,
            file_path: None,
            analytics: None,
        }
    }
}

/// Partial update applied by `VideoStore::update`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPatch {
    pub topic: Option<String>,
    pub description: Option<String>,
    pub caption: Option<String>,
    pub thumbnail_prompt: Option<String>,
    pub hook_score: Option<u8>,
    pub retention_notes: Option<Vec<String>>,
    pub status: Option<VideoStatus>,
    pub scheduled_for: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub youtube_video_id: Option<String>,
    pub file_path: Option<String>,
    pub analytics: Option<VideoAnalytics>,
}

impl VideoPatch {
    pub fn apply_to(self, video: &mut VideoItem) {
        if let Some(v) = self.topic {
            video.topic = v;
        }
        if let Some(v) = self.description {
            video.description = v;
        }
        if let Some(v) = self.caption {
            video.caption = v;
        }
        if let Some(v) = self.thumbnail_prompt {
            video.thumbnail_prompt = v;
        }
        if let Some(v) = self.hook_score {
            video.hook_score = v.min(100);
        }
        if let Some(v) = self.retention_notes {
            video.retention_notes = v;
        }
        if let Some(v) = self.status {
            video.status = v;
        }
        if let Some(v) = self.scheduled_for {
            video.scheduled_for = Some(v);
        }
        if let Some(v) = self.published_at {
            video.published_at = Some(v);
        }
        if let Some(v) = self.youtube_video_id {
            video.youtube_video_id = Some(v);
        }
        if let Some(v) = self.file_path {
            video.file_path = Some(v);
        }
        if let Some(v) = self.analytics {
            video.analytics = Some(v);
        }
    }
}
