use crate::env_variable_utils::BACKEND_URL;
use crate::models::{ErrorResponse, VideoSummary};
use crate::utils::RequestGuard;
use gloo_net::http::Request;
use yew::prelude::*;

/// Run a search and write the outcome into the dashboard state. The response
/// is dropped when a newer search started in the meantime.
pub async fn run_search(
    query: String,
    token: u64,
    guard: RequestGuard,
    search_results: UseStateHandle<Vec<VideoSummary>>,
    error_message: UseStateHandle<Option<String>>,
    loading: UseStateHandle<bool>,
) {
    let url = format!(
        "{}/api/search?query={}",
        &*BACKEND_URL,
        urlencoding::encode(&query)
    );

    let outcome = fetch_videos(&url).await;

    if !guard.is_current(token) {
        return;
    }

    match outcome {
        Ok(videos) => {
            search_results.set(videos);
            error_message.set(None);
        }
        Err(e) => {
            search_results.set(Vec::new());
            error_message.set(Some(e));
        }
    }
    loading.set(false);
}

async fn fetch_videos(url: &str) -> Result<Vec<VideoSummary>, String> {
    let response = Request::get(url)
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
        // Prefer the backend's structured message when there is one.
        match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(error_response) => Err(error_response.message),
            Err(_) => Err(format!("Search failed ({status}): {text}")),
        }
    }
}
