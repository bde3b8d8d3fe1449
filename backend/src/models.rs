use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, FromFormField, Response};
use std::io::Cursor;

/// Flat per-video row returned by search and compare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

/// Full metadata for a single video, including the contentDetails duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

/// A top-level comment thread, sourced verbatim from upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

/// One day of the synthetic stats history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(default)]
    pub video_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromFormField)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[field(value = "general")]
    General,
    #[field(value = "content")]
    Content,
    #[field(value = "engagement")]
    Engagement,
    #[field(value = "growth")]
    Growth,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub video_id: String,
    pub analysis_type: AnalysisType,
    pub analysis: String,
}

/// Error taxonomy of the HTTP surface: absent resources map to 404,
/// missing input to 400, everything upstream to a generic 500 carrying the
/// raw underlying error text.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Upstream { message: String, error: String },
}

impl ApiError {
    pub fn upstream(message: &str, err: anyhow::Error) -> Self {
        ApiError::Upstream {
            message: message.to_string(),
            error: err.to_string(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let (status, body) = match self {
            ApiError::NotFound(message) => {
                (Status::NotFound, serde_json::json!({ "message": message }))
            }
            ApiError::BadRequest(message) => {
                (Status::BadRequest, serde_json::json!({ "message": message }))
            }
            ApiError::Upstream { message, error } => (
                Status::InternalServerError,
                serde_json::json!({ "message": message, "error": error }),
            ),
        };

        let json = body.to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
