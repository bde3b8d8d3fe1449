use crate::models::{
    AiAnalysis, AnalysisType, ApiError, CommentThread, HistoricalPoint, VideoDetails,
};
use crate::services::{analysis_service, gemini_service, video_service};
use crate::AppState;
use log::{error, info};
use rocket::serde::json::Json;
use rocket::{get, FromForm, State};

const DEFAULT_COMMENT_PAGE_SIZE: u32 = 20;

#[derive(FromForm)]
pub struct CommentParams {
    #[field(name = "maxResults")]
    pub max_results: Option<u32>,
}

#[derive(FromForm)]
pub struct AnalysisParams {
    #[field(name = "analysisType")]
    pub analysis_type: Option<AnalysisType>,
}

#[get("/video/<id>")]
pub async fn get_video(state: &State<AppState>, id: &str) -> Result<Json<VideoDetails>, ApiError> {
    match video_service::get_video(&state.youtube, id).await {
        Ok(Some(video)) => Ok(Json(video)),
        Ok(None) => Err(ApiError::NotFound("Video not found".to_string())),
        Err(e) => {
            error!("Error fetching video details: {e:?}");
            Err(ApiError::upstream("Server error", e))
        }
    }
}

#[get("/video/<id>/comments?<params..>")]
pub async fn get_comments(
    state: &State<AppState>,
    id: &str,
    params: CommentParams,
) -> Result<Json<Vec<CommentThread>>, ApiError> {
    let max_results = params.max_results.unwrap_or(DEFAULT_COMMENT_PAGE_SIZE);

    match video_service::get_comments(&state.youtube, id, max_results).await {
        Ok(comments) => Ok(Json(comments)),
        Err(e) => {
            error!("Error fetching comments: {e:?}");
            Err(ApiError::upstream("Server error", e))
        }
    }
}

#[get("/video/<id>/stats/history")]
pub async fn get_history(
    state: &State<AppState>,
    id: &str,
) -> Result<Json<Vec<HistoricalPoint>>, ApiError> {
    match video_service::get_history(&state.youtube, id).await {
        Ok(Some(points)) => Ok(Json(points)),
        Ok(None) => Err(ApiError::NotFound("Video not found".to_string())),
        Err(e) => {
            error!("Error generating historical stats: {e:?}");
            Err(ApiError::upstream("Server error", e))
        }
    }
}

#[get("/video/<id>/ai-analysis?<params..>")]
pub async fn ai_analysis(
    state: &State<AppState>,
    id: &str,
    params: AnalysisParams,
) -> Result<Json<AiAnalysis>, ApiError> {
    let analysis_type = params.analysis_type.unwrap_or(AnalysisType::General);
    info!("AI analysis request received for video ID: {id}");

    match analysis_service::analyze(&state.youtube, &state.gemini, id, analysis_type).await {
        Ok(Some(analysis)) => Ok(Json(analysis)),
        Ok(None) => Err(ApiError::NotFound("Video not found".to_string())),
        Err(e) if gemini_service::is_api_key_error(&e) => {
            error!("Gemini credential failure: {e:?}");
            Err(ApiError::Upstream {
                message: "AI API key error".to_string(),
                error: "The API key for Gemini AI is invalid or has insufficient permissions."
                    .to_string(),
            })
        }
        Err(e) => {
            error!("Error generating AI analysis: {e:?}");
            Err(ApiError::upstream("Failed to generate AI analysis", e))
        }
    }
}
