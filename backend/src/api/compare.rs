use crate::models::{ApiError, CompareRequest, VideoSummary};
use crate::services::video_service;
use crate::AppState;
use log::error;
use rocket::serde::json::Json;
use rocket::{post, State};

#[post("/videos/compare", data = "<request>")]
pub async fn compare_videos(
    state: &State<AppState>,
    request: Json<CompareRequest>,
) -> Result<Json<Vec<VideoSummary>>, ApiError> {
    if request.video_ids.is_empty() {
        return Err(ApiError::BadRequest(
            "Video IDs array is required".to_string(),
        ));
    }

    match video_service::compare_videos(&state.youtube, &request.video_ids).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            error!("Error comparing videos: {e:?}");
            Err(ApiError::upstream("Server error", e))
        }
    }
}
