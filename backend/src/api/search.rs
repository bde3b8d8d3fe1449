use crate::models::{ApiError, VideoSummary};
use crate::services::search_service::{self, SearchOutcome};
use crate::AppState;
use log::{error, info};
use rocket::serde::json::Json;
use rocket::{get, FromForm, State};

const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(FromForm)]
pub struct SearchParams {
    pub query: Option<String>,
    #[field(name = "maxResults")]
    pub max_results: Option<u32>,
}

#[get("/search?<params..>")]
pub async fn search_videos(
    state: &State<AppState>,
    params: SearchParams,
) -> Result<Json<Vec<VideoSummary>>, ApiError> {
    let Some(query) = params.query.filter(|q| !q.is_empty()) else {
        return Err(ApiError::BadRequest("Search query is required".to_string()));
    };
    let max_results = params.max_results.unwrap_or(DEFAULT_PAGE_SIZE);
    info!("Search request received: query={query:?}, maxResults={max_results}");

    match search_service::search(&state.youtube, &query, max_results).await {
        Ok(SearchOutcome::Videos(videos)) => {
            info!("Sending response with {} videos", videos.len());
            Ok(Json(videos))
        }
        Ok(SearchOutcome::ChannelNotFound) => {
            Err(ApiError::NotFound("Channel not found".to_string()))
        }
        Err(e) => {
            error!("Error searching videos: {e:?}");
            Err(ApiError::upstream("Server error", e))
        }
    }
}
