use anyhow::Result;
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Upstream batch limit for videos.list.
pub const MAX_BATCH_IDS: usize = 50;

/// Thin authenticated wrapper over the YouTube Data API v3.
///
/// Every failure surfaces as one generic error: callers cannot tell a quota
/// problem from a network failure or a bad key. No retries, no rate-limit
/// handling.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        YoutubeClient {
            http: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_items(&self, resource: &str, params: &[(&str, &str)]) -> Result<Vec<Value>> {
        let url = format!("{}/{resource}", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.json::<Value>().await?;
        Ok(body["items"].as_array().cloned().unwrap_or_default())
    }

    /// videos.list for up to 50 IDs, comma-joined. IDs beyond the upstream
    /// batch limit are dropped.
    pub async fn list_videos(&self, video_ids: &[String], part: &str) -> Result<Vec<Value>> {
        let ids = video_ids
            .iter()
            .take(MAX_BATCH_IDS)
            .cloned()
            .collect::<Vec<_>>()
            .join(",");
        self.get_items("videos", &[("part", part), ("id", &ids)])
            .await
    }

    /// Keyword search over videos.
    pub async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Value>> {
        self.get_items(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", &max_results.to_string()),
            ],
        )
        .await
    }

    /// "Most popular in region US" listing backing the `trending` sentinel.
    pub async fn most_popular(&self, max_results: u32) -> Result<Vec<Value>> {
        self.get_items(
            "search",
            &[
                ("part", "snippet"),
                ("chart", "mostPopular"),
                ("regionCode", "US"),
                ("maxResults", &max_results.to_string()),
            ],
        )
        .await
    }

    /// Resolve a legacy username directly to its channel ID.
    pub async fn channel_id_for_username(&self, username: &str) -> Result<Option<String>> {
        let items = self
            .get_items("channels", &[("part", "id"), ("forUsername", username)])
            .await?;

        Ok(items
            .first()
            .and_then(|item| item["id"].as_str())
            .map(String::from))
    }

    /// Channel-type search fallback when the username lookup finds nothing.
    pub async fn search_channel_id(&self, query: &str) -> Result<Option<String>> {
        let items = self
            .get_items(
                "search",
                &[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "channel"),
                    ("maxResults", "1"),
                ],
            )
            .await?;

        Ok(items
            .first()
            .and_then(|item| item["id"]["channelId"].as_str())
            .map(String::from))
    }

    /// Most recent uploads of a channel.
    pub async fn channel_videos(&self, channel_id: &str, max_results: u32) -> Result<Vec<Value>> {
        self.get_items(
            "search",
            &[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("type", "video"),
                ("order", "date"),
                ("maxResults", &max_results.to_string()),
            ],
        )
        .await
    }

    /// Top-level comment threads of a video. Fails when comments are
    /// disabled upstream.
    pub async fn comment_threads(&self, video_id: &str, max_results: u32) -> Result<Vec<Value>> {
        self.get_items(
            "commentThreads",
            &[
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", &max_results.to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_videos_sends_key_and_parses_items() {
        let server = MockServer::start().await;

        let body = json!({
            "items": [
                { "id": "abc", "snippet": { "title": "First" } },
                { "id": "def", "snippet": { "title": "Second" } }
            ]
        });

        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("key", "test-key"))
            .and(query_param("id", "abc,def"))
            .and(query_param("part", "snippet,statistics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = YoutubeClient::with_base_url("test-key", &server.uri());
        let items = client
            .list_videos(&["abc".to_string(), "def".to_string()], "snippet,statistics")
            .await
            .expect("should parse items");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], "abc");
        assert_eq!(items[1]["snippet"]["title"], "Second");
    }

    #[tokio::test]
    async fn missing_items_array_yields_empty_vec() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "kind": "youtube#videoListResponse" })))
            .mount(&server)
            .await;

        let client = YoutubeClient::with_base_url("test-key", &server.uri());
        let items = client
            .list_videos(&["missing".to_string()], "snippet")
            .await
            .expect("empty response should not error");

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn channel_username_lookup_resolves_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("forUsername", "foo"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "id": "UC123" }] })),
            )
            .mount(&server)
            .await;

        let client = YoutubeClient::with_base_url("test-key", &server.uri());
        let id = client
            .channel_id_for_username("foo")
            .await
            .expect("lookup should succeed");

        assert_eq!(id.as_deref(), Some("UC123"));
    }

    #[tokio::test]
    async fn comment_threads_pass_video_id_and_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("videoId", "abc"))
            .and(query_param("maxResults", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = YoutubeClient::with_base_url("test-key", &server.uri());
        let items = client
            .comment_threads("abc", 20)
            .await
            .expect("should succeed");

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_a_generic_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "message": "quotaExceeded" }
            })))
            .mount(&server)
            .await;

        let client = YoutubeClient::with_base_url("test-key", &server.uri());
        let result = client.list_videos(&["abc".to_string()], "snippet").await;

        assert!(result.is_err());
    }
}
