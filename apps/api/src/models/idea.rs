#![allow(dead_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    StockVideo,
    Music,
    Template,
    Broll,
    SoundEffect,
}

/// Display-only pointer to a supporting asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSuggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub title: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// An ephemeral video idea. Recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoIdea {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub primary_keyword: String,
    pub hook_score: u32,
    pub retention_tactics: Vec<String>,
    pub assets: Vec<AssetSuggestion>,
}
