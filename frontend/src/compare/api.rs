use crate::env_variable_utils::BACKEND_URL;
use crate::models::{CompareRequest, ErrorResponse, VideoSummary};
use crate::utils::RequestGuard;
use gloo_net::http::Request;
use yew::prelude::*;

/// POST the selected IDs and write the comparison rows into state. Stale
/// responses (a newer selection was submitted) are dropped.
pub async fn load_comparison(
    video_ids: Vec<String>,
    token: u64,
    guard: RequestGuard,
    rows: UseStateHandle<Vec<VideoSummary>>,
    error_message: UseStateHandle<Option<String>>,
    loading: UseStateHandle<bool>,
) {
    let outcome = fetch_comparison(video_ids).await;

    if !guard.is_current(token) {
        return;
    }

    match outcome {
        Ok(data) => {
            rows.set(data);
            error_message.set(None);
        }
        Err(e) => error_message.set(Some(e)),
    }
    loading.set(false);
}

async fn fetch_comparison(video_ids: Vec<String>) -> Result<Vec<VideoSummary>, String> {
    let url = format!("{}/api/videos/compare", &*BACKEND_URL);
    let body = CompareRequest { video_ids };

    let response = Request::post(&url)
        .json(&body)
        .map_err(|e| format!("Request error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if response.ok() {
        response
            .json::<Vec<VideoSummary>>()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(error_response) => Err(error_response.message),
            Err(_) => Err(format!("Comparison failed ({status}): {text}")),
        }
    }
}
