use crate::env_variable_utils::BACKEND_URL;
use crate::models::{AiAnalysis, CommentThread, ErrorResponse, HistoricalPoint, VideoDetails};
use crate::utils::RequestGuard;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use yew::prelude::*;

/// GET a backend endpoint and decode its JSON body, surfacing the backend's
/// structured message on failure.
async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(error_response) => Err(error_response.message),
            Err(_) => Err(format!("Request failed ({status}): {text}")),
        }
    }
}

pub async fn load_video_details(
    video_id: String,
    token: u64,
    guard: RequestGuard,
    details: UseStateHandle<Option<VideoDetails>>,
    error_message: UseStateHandle<Option<String>>,
) {
    let url = format!("{}/api/video/{video_id}", &*BACKEND_URL);
    let outcome = fetch_json::<VideoDetails>(&url).await;

    if !guard.is_current(token) {
        return;
    }

    match outcome {
        Ok(data) => details.set(Some(data)),
        Err(e) => error_message.set(Some(e)),
    }
}

pub async fn load_comments(
    video_id: String,
    token: u64,
    guard: RequestGuard,
    comments: UseStateHandle<Option<Vec<CommentThread>>>,
    error_message: UseStateHandle<Option<String>>,
) {
    let url = format!("{}/api/video/{video_id}/comments", &*BACKEND_URL);
    let outcome = fetch_json::<Vec<CommentThread>>(&url).await;

    if !guard.is_current(token) {
        return;
    }

    match outcome {
        Ok(data) => comments.set(Some(data)),
        Err(e) => error_message.set(Some(e)),
    }
}

pub async fn load_history(
    video_id: String,
    token: u64,
    guard: RequestGuard,
    history: UseStateHandle<Option<Vec<HistoricalPoint>>>,
    error_message: UseStateHandle<Option<String>>,
) {
    let url = format!("{}/api/video/{video_id}/stats/history", &*BACKEND_URL);
    let outcome = fetch_json::<Vec<HistoricalPoint>>(&url).await;

    if !guard.is_current(token) {
        return;
    }

    match outcome {
        Ok(data) => history.set(Some(data)),
        Err(e) => error_message.set(Some(e)),
    }
}

pub async fn load_analysis(
    video_id: String,
    analysis_type: &'static str,
    token: u64,
    guard: RequestGuard,
    analysis: UseStateHandle<Option<AiAnalysis>>,
    error_message: UseStateHandle<Option<String>>,
    loading: UseStateHandle<bool>,
) {
    let url = format!(
        "{}/api/video/{video_id}/ai-analysis?analysisType={analysis_type}",
        &*BACKEND_URL
    );
    let outcome = fetch_json::<AiAnalysis>(&url).await;

    if !guard.is_current(token) {
        return;
    }

    match outcome {
        Ok(data) => {
            analysis.set(Some(data));
            error_message.set(None);
        }
        Err(e) => error_message.set(Some(e)),
    }
    loading.set(false);
}
