//! Recommendation Engine: maps trending keywords plus recent history to video ideas.
//!
//! Pure and synchronous. Identical inputs always yield identical output.
//!
//! Algorithm:
//! 1. Drop trends whose keyword already appears (case-insensitive substring)
//!    in the topic of any history item.
//! 2. Keep the first `MAX_IDEAS` survivors, in input order.
//! 3. For survivor `i`, apply template `i mod 3`, derive a primary keyword,
//!    a hook score in 70–95, an id, and three asset suggestions.
//! 4. Pick a rationale: all-covered > channel-specific > generic.

use serde::Serialize;

use crate::models::{AssetSuggestion, AssetType, ChannelMetrics, TrendResult, VideoIdea, VideoItem};
use crate::seed::code_point_sum;

pub const MAX_IDEAS: usize = 6;
pub const HOOK_SCORE_BASE: u64 = 70;
pub const HOOK_SCORE_SPREAD: u64 = 30;
pub const HOOK_SCORE_CAP: u32 = 95;

pub const RATIONALE_ALL_COVERED: &str = "All trending topics already covered recently; re-surface the highest performers with refreshed hooks.";
pub const RATIONALE_GENERIC: &str = "Blends emerging search momentum with channel proven formats.";

const TOPIC_PLACEHOLDER: &str = "{topic}";

struct VideoTemplate {
    title: &'static str,
    summary: &'static str,
    tactics: [&'static str; 3],
}

const VIDEO_TEMPLATES: [VideoTemplate; 3] = [
    VideoTemplate {
        title: "Why {topic} Is Exploding Right Now",
        summary: "Break down the viral elements that make {topic} irresistible and show how to ride the wave.",
        tactics: [
            "Use rapid-fire stats with motion-tracked typography.",
            "Smash cut between you and trending clips to keep momentum.",
            "End with a cliffhanger statistic to drive comments.",
        ],
    },
    VideoTemplate {
        title: "{topic} in 30 Seconds: Creator Playbook",
        summary: "Deliver a rapid blueprint that makes viewers feel confident to act immediately.",
        tactics: [
            "Overlay progress bar to signal pacing and build anticipation.",
            "Flash high-contrast keyword cards synced to narration beats.",
            "Tease a bonus tactic mid-video to retain viewers.",
        ],
    },
    VideoTemplate {
        title: "Avoid These {topic} Mistakes Everyone Makes",
        summary: "Hook viewers with high-stakes pitfalls around {topic} and offer quick fixes.",
        tactics: [
            "Use glitch transitions to emphasize mistakes.",
            "Highlight audience comments as social proof.",
            "Add sound design spikes whenever a mistake appears.",
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<VideoIdea>,
    pub rationale: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Builds up to `MAX_IDEAS` ideas from `trends`, skipping topics already in `history`.
///
/// `history` is whatever window the caller chose; the engine applies no limit of its own.
pub fn build_recommendations(
    trends: &[TrendResult],
    history: &[VideoItem],
    channel_metrics: Option<&ChannelMetrics>,
) -> RecommendationResponse {
    let recommendations: Vec<VideoIdea> = trends
        .iter()
        .filter(|trend| !already_covered(&trend.keyword, history))
        .take(MAX_IDEAS)
        .enumerate()
        .map(|(index, trend)| build_idea(trend, index))
        .collect();

    let rationale = if recommendations.is_empty() && !trends.is_empty() {
        RATIONALE_ALL_COVERED.to_string()
    } else if let Some(metrics) = channel_metrics {
        format!(
            "Tailored to {}, focusing on boosting retention (avg {}%) and mirroring positive comment sentiment.",
            metrics.channel_name, metrics.avg_retention_rate
        )
    } else {
        RATIONALE_GENERIC.to_string()
    };

    RecommendationResponse {
        recommendations,
        rationale,
    }
}

fn build_idea(trend: &TrendResult, index: usize) -> VideoIdea {
    let template = pick_template(index);
    VideoIdea {
        id: idea_id(&trend.keyword, index),
        title: fill_topic(template.title, &trend.keyword),
        summary: fill_topic(template.summary, &trend.keyword),
        primary_keyword: primary_keyword(trend),
        hook_score: hook_score(&trend.keyword, index),
        retention_tactics: template.tactics.iter().map(|t| t.to_string()).collect(),
        assets: suggested_assets(&trend.keyword),
    }
}

/// Substring containment, not fuzzy matching: "AI" is covered by "Email tips".
fn already_covered(keyword: &str, history: &[VideoItem]) -> bool {
    let needle = keyword.to_lowercase();
    history
        .iter()
        .any(|item| item.topic.to_lowercase().contains(&needle))
}

fn pick_template(index: usize) -> &'static VideoTemplate {
    &VIDEO_TEMPLATES[index % VIDEO_TEMPLATES.len()]
}

/// Replaces the first `{topic}` placeholder with the keyword, verbatim.
fn fill_topic(pattern: &str, keyword: &str) -> String {
    pattern.replacen(TOPIC_PLACEHOLDER, keyword, 1)
}

/// First category tag, else the first whitespace-delimited token of the keyword.
fn primary_keyword(trend: &TrendResult) -> String {
    match trend.categories.first() {
        Some(category) => category.clone(),
        None => trend
            .keyword
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// `70 + (Σ code points of "{keyword}{index}" mod 30)`, capped at 95.
pub fn hook_score(keyword: &str, index: usize) -> u32 {
    let seed = format!("{keyword}{index}");
    let raw = HOOK_SCORE_BASE + code_point_sum(&seed) % HOOK_SCORE_SPREAD;
    (raw as u32).min(HOOK_SCORE_CAP)
}

/// Whitespace runs become one hyphen, lowercased, suffixed with `-{index}`.
/// Not unique across calls: the same keyword at the same index repeats.
pub fn idea_id(keyword: &str, index: usize) -> String {
    let mut slug = String::with_capacity(keyword.len() + 4);
    let mut in_whitespace = false;
    for c in keyword.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }
    format!("{}-{index}", slug.to_lowercase())
}

fn suggested_assets(keyword: &str) -> Vec<AssetSuggestion> {
    vec![
        AssetSuggestion {
            id: format!("{keyword}-broll"),
            asset_type: AssetType::StockVideo,
            title: format!("{keyword} cinematic b-roll"),
            source: "Pexels".to_string(),
            url: Some("https://www.pexels.com/search/shorts/".to_string()),
            thumbnail: None,
        },
        AssetSuggestion {
            id: format!("{keyword}-music"),
            asset_type: AssetType::Music,
            title: "High-energy beat for fast cuts".to_string(),
            source: "Artlist".to_string(),
            url: Some("https://artlist.io/".to_string()),
            thumbnail: None,
        },
        AssetSuggestion {
            id: format!("{keyword}-template"),
            asset_type: AssetType::Template,
            title: "Vertical split-screen template".to_string(),
            source: "Canva".to_string(),
            url: Some("https://www.canva.com/".to_string()),
            thumbnail: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentSnapshot;
    use chrono::Utc;

    fn trend(keyword: &str, categories: &[&str]) -> TrendResult {
        TrendResult {
            keyword: keyword.to_string(),
            interest_score: 80,
            summary: String::new(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            last_updated: "2024-05-01T00:00:00Z".to_string(),
        }
    }

    fn posted(topic: &str) -> VideoItem {
        VideoItem::new("h1", topic, Utc::now())
    }

    fn metrics(name: &str, retention: f64) -> ChannelMetrics {
        ChannelMetrics {
            channel_id: "c1".to_string(),
            channel_name: name.to_string(),
            total_subscribers: 1,
            total_views: 1,
            avg_retention_rate: retention,
            avg_click_through_rate: 5.0,
            avg_comments_per_video: 3.0,
            trending_topics: vec![],
            sentiment_snapshot: SentimentSnapshot {
                positive: 60,
                neutral: 30,
                negative: 10,
            },
        }
    }

    #[test]
    fn test_single_trend_uses_first_template_and_category() {
        let out = build_recommendations(&[trend("AI editing tricks", &["ai"])], &[], None);
        assert_eq!(out.recommendations.len(), 1);
        let idea = &out.recommendations[0];
        assert_eq!(idea.title, "Why AI editing tricks Is Exploding Right Now");
        assert_eq!(
            idea.summary,
            "Break down the viral elements that make AI editing tricks irresistible and show how to ride the wave."
        );
        assert_eq!(idea.primary_keyword, "ai");
        assert_eq!(idea.id, "ai-editing-tricks-0");
        assert_eq!(idea.retention_tactics.len(), 3);
        assert_eq!(out.rationale, RATIONALE_GENERIC);
    }

    #[test]
    fn test_covered_trend_is_dropped_with_covered_rationale() {
        let history = vec![posted("Deep dive into AI editing tricks for creators")];
        let out = build_recommendations(&[trend("AI editing tricks", &[])], &history, None);
        assert!(out.recommendations.is_empty());
        assert_eq!(out.rationale, RATIONALE_ALL_COVERED);
    }

    #[test]
    fn test_covered_check_is_case_insensitive_substring() {
        let history = vec![posted("why BUDGET CINEMATIC TRANSITIONS work")];
        let trends = vec![
            trend("Budget cinematic transitions", &[]),
            trend("Micro-learning business tips", &[]),
        ];
        let out = build_recommendations(&trends, &history, None);
        assert_eq!(out.recommendations.len(), 1);
        assert_eq!(out.recommendations[0].id, "micro-learning-business-tips-0");
    }

    #[test]
    fn test_coincidental_substring_counts_as_covered() {
        let history = vec![posted("Email marketing basics")];
        let out = build_recommendations(&[trend("ai", &[])], &history, None);
        assert!(out.recommendations.is_empty());
    }

    #[test]
    fn test_truncates_to_six_preserving_order() {
        let trends: Vec<TrendResult> = (0..10).map(|i| trend(&format!("topic {i}"), &[])).collect();
        let out = build_recommendations(&trends, &[], None);
        assert_eq!(out.recommendations.len(), MAX_IDEAS);
        for (i, idea) in out.recommendations.iter().enumerate() {
            assert_eq!(idea.id, format!("topic-{i}-{i}"));
        }
    }

    #[test]
    fn test_index_counts_survivors_not_input_positions() {
        let history = vec![posted("first topic recap")];
        let trends = vec![trend("first topic", &[]), trend("second topic", &[])];
        let out = build_recommendations(&trends, &history, None);
        assert_eq!(out.recommendations[0].id, "second-topic-0");
        assert!(out.recommendations[0].title.starts_with("Why second topic"));
    }

    #[test]
    fn test_templates_cycle_every_three() {
        let trends: Vec<TrendResult> = (0..4).map(|i| trend(&format!("k{i}"), &[])).collect();
        let out = build_recommendations(&trends, &[], None);
        assert_eq!(out.recommendations[1].title, "k1 in 30 Seconds: Creator Playbook");
        assert_eq!(out.recommendations[2].title, "Avoid These k2 Mistakes Everyone Makes");
        assert_eq!(out.recommendations[3].title, "Why k3 Is Exploding Right Now");
        // second template has no placeholder in its summary
        assert_eq!(
            out.recommendations[1].summary,
            "Deliver a rapid blueprint that makes viewers feel confident to act immediately."
        );
    }

    #[test]
    fn test_primary_keyword_falls_back_to_first_token() {
        let out = build_recommendations(&[trend("Viral   Reddit stories", &[])], &[], None);
        assert_eq!(out.recommendations[0].primary_keyword, "Viral");
        assert_eq!(out.recommendations[0].id, "viral-reddit-stories-0");
    }

    #[test]
    fn test_hook_score_is_capped_at_95() {
        // Σ code points of "AI editing tricks0" = 1646; 1646 mod 30 = 26 → 96 → 95
        assert_eq!(hook_score("AI editing tricks", 0), 95);
    }

    #[test]
    fn test_hook_score_always_in_range() {
        for kw in ["", "a", "AI editing tricks", "Budget cinematic transitions", "日本"] {
            for i in 0..MAX_IDEAS {
                let s = hook_score(kw, i);
                assert!((70..=95).contains(&s), "{kw}/{i} → {s}");
            }
        }
    }

    #[test]
    fn test_channel_rationale_names_channel_and_retention() {
        let m = metrics("Creator Shorts Lab", 57.4);
        let out = build_recommendations(&[trend("x", &[])], &[], Some(&m));
        assert_eq!(
            out.rationale,
            "Tailored to Creator Shorts Lab, focusing on boosting retention (avg 57.4%) and mirroring positive comment sentiment."
        );
    }

    #[test]
    fn test_all_covered_wins_over_channel_rationale() {
        let m = metrics("Lab", 50.0);
        let history = vec![posted("x marks the spot")];
        let out = build_recommendations(&[trend("x", &[])], &history, Some(&m));
        assert_eq!(out.rationale, RATIONALE_ALL_COVERED);
    }

    #[test]
    fn test_empty_trends_yields_generic_rationale() {
        let out = build_recommendations(&[], &[posted("anything")], None);
        assert!(out.recommendations.is_empty());
        assert_eq!(out.rationale, RATIONALE_GENERIC);
    }

    #[test]
    fn test_assets_are_three_fixed_shapes() {
        let out = build_recommendations(&[trend("npc streams", &[])], &[], None);
        let assets = &out.recommendations[0].assets;
        assert_eq!(assets.len(), 3);
        assert_eq!(assets[0].id, "npc streams-broll");
        assert_eq!(assets[0].asset_type, AssetType::StockVideo);
        assert_eq!(assets[1].asset_type, AssetType::Music);
        assert_eq!(assets[2].asset_type, AssetType::Template);
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let trends = vec![trend("a b", &["x"]), trend("c", &[])];
        let history = vec![posted("zzz")];
        let m = metrics("Lab", 61.0);
        let first = serde_json::to_string(&build_recommendations(&trends, &history, Some(&m))).unwrap();
        let second = serde_json::to_string(&build_recommendations(&trends, &history, Some(&m))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_idea_id_collapses_leading_and_mixed_whitespace() {
        assert_eq!(idea_id(" Tabs\tand  Spaces", 2), "-tabs-and-spaces-2");
    }
}
