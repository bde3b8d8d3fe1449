use serde::{Deserialize, Serialize};

/// Per-video row from `/api/search` and `/api/videos/compare`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub engagement_rate: f64,
}

/// Full metadata from `/api/video/<id>`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub duration_display: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub engagement_rate: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: String,
    pub author: String,
    pub author_profile_image_url: String,
    pub text: String,
    pub like_count: u64,
    pub published_at: String,
    pub reply_count: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoricalPoint {
    pub date: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub video_id: String,
    pub analysis_type: String,
    pub analysis: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub video_ids: Vec<String>,
}

/// Error body the backend returns for 4xx/5xx responses.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
    pub error: Option<String>,
}
