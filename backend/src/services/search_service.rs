use crate::models::VideoSummary;
use crate::services::video_service::video_summary_from_item;
use crate::services::youtube_service::YoutubeClient;
use crate::utils::extract_channel_handle;
use anyhow::Result;
use log::info;
use serde_json::Value;

/// Sentinel query mapped to the most-popular listing on initial load.
pub const TRENDING_QUERY: &str = "trending";

#[derive(Debug, PartialEq)]
pub enum SearchOutcome {
    Videos(Vec<VideoSummary>),
    /// The query named a channel handle that resolved to nothing.
    ChannelNotFound,
}

/// Disambiguate the query and orchestrate the upstream calls.
///
/// Priority is fixed: a channel URL/handle wins over everything (so
/// `"@trending"` is a handle), then the literal `trending` sentinel, then a
/// plain keyword search. Search hits are re-fetched through the batch videos
/// endpoint to attach statistics.
pub async fn search(
    yt: &YoutubeClient,
    query: &str,
    max_results: u32,
) -> Result<SearchOutcome> {
    let hits = if let Some(handle) = extract_channel_handle(query) {
        info!("Detected channel search for handle: {handle}");
        let Some(channel_id) = resolve_channel_id(yt, &handle).await? else {
            info!("Channel not found: {handle}");
            return Ok(SearchOutcome::ChannelNotFound);
        };
        info!("Found channel ID: {channel_id}");
        yt.channel_videos(&channel_id, max_results).await?
    } else if query == TRENDING_QUERY {
        info!("Fetching trending videos");
        yt.most_popular(max_results).await?
    } else {
        info!("Searching videos with query: {query}");
        yt.search_videos(query, max_results).await?
    };

    let video_ids: Vec<String> = hits.iter().filter_map(search_hit_video_id).collect();
    if video_ids.is_empty() {
        return Ok(SearchOutcome::Videos(Vec::new()));
    }

    let items = yt.list_videos(&video_ids, "snippet,statistics").await?;
    info!("Statistics received for {} videos", items.len());

    Ok(SearchOutcome::Videos(
        items.iter().map(video_summary_from_item).collect(),
    ))
}

/// Direct username lookup first, channel-type search as fallback.
async fn resolve_channel_id(yt: &YoutubeClient, handle: &str) -> Result<Option<String>> {
    if let Some(id) = yt.channel_id_for_username(handle).await? {
        return Ok(Some(id));
    }
    info!("Channel not found by username, trying search...");
    yt.search_channel_id(handle).await
}

/// search.list hits nest the ID under `id.videoId`; videos.list items carry
/// it directly under `id`.
fn search_hit_video_id(item: &Value) -> Option<String> {
    item["id"]["videoId"]
        .as_str()
        .or_else(|| item["id"].as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn search_hit(video_id: &str) -> Value {
        json!({ "id": { "videoId": video_id }, "snippet": { "title": video_id } })
    }

    fn video_item(video_id: &str, views: &str) -> Value {
        json!({
            "id": video_id,
            "snippet": {
                "title": format!("title-{video_id}"),
                "channelTitle": "Chan",
                "thumbnails": { "medium": { "url": "http://img" } }
            },
            "statistics": { "viewCount": views, "likeCount": "10", "commentCount": "5" }
        })
    }

    async fn mock_stats_batch(server: &MockServer, ids: &str, items: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", ids))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn plain_query_searches_then_backfills_statistics() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust tutorials"))
            .and(query_param("type", "video"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [search_hit("a1"), search_hit("b2")]
            })))
            .mount(&server)
            .await;
        mock_stats_batch(&server, "a1,b2", vec![video_item("a1", "100"), video_item("b2", "200")]).await;

        let client = YoutubeClient::with_base_url("k", &server.uri());
        let outcome = search(&client, "rust tutorials", 10).await.unwrap();

        let SearchOutcome::Videos(videos) = outcome else {
            panic!("expected videos");
        };
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, "a1");
        assert_eq!(videos[0].view_count, 100);
        assert_eq!(videos[1].engagement_rate, 7.5);
    }

    #[tokio::test]
    async fn trending_uses_most_popular_chart_not_channel_resolution() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("chart", "mostPopular"))
            .and(query_param("regionCode", "US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [search_hit("top1")]
            })))
            .mount(&server)
            .await;
        mock_stats_batch(&server, "top1", vec![video_item("top1", "9000")]).await;

        let client = YoutubeClient::with_base_url("k", &server.uri());
        let outcome = search(&client, "trending", 10).await.unwrap();

        let SearchOutcome::Videos(videos) = outcome else {
            panic!("expected videos");
        };
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "top1");
        // No /channels call was mocked; reaching here proves none happened.
    }

    #[tokio::test]
    async fn handle_resolves_username_then_lists_channel_uploads() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("forUsername", "foo"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "id": "UC42" }] })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("channelId", "UC42"))
            .and(query_param("order", "date"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [search_hit("v1")]
            })))
            .mount(&server)
            .await;
        mock_stats_batch(&server, "v1", vec![video_item("v1", "50")]).await;

        let client = YoutubeClient::with_base_url("k", &server.uri());
        let outcome = search(&client, "https://youtube.com/@foo", 10).await.unwrap();

        let SearchOutcome::Videos(videos) = outcome else {
            panic!("expected videos");
        };
        assert_eq!(videos[0].id, "v1");
    }

    #[tokio::test]
    async fn handle_falls_back_to_channel_search_when_username_lookup_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("type", "channel"))
            .and(query_param("q", "bar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "id": { "channelId": "UC77" } }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("channelId", "UC77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [search_hit("v9")]
            })))
            .mount(&server)
            .await;
        mock_stats_batch(&server, "v9", vec![video_item("v9", "70")]).await;

        let client = YoutubeClient::with_base_url("k", &server.uri());
        let outcome = search(&client, "@bar", 10).await.unwrap();

        let SearchOutcome::Videos(videos) = outcome else {
            panic!("expected videos");
        };
        assert_eq!(videos[0].id, "v9");
    }

    #[tokio::test]
    async fn at_trending_is_treated_as_a_handle() {
        let server = MockServer::start().await;

        // Both resolution steps come back empty: the query must NOT fall
        // through to the trending chart.
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("forUsername", "trending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("type", "channel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = YoutubeClient::with_base_url("k", &server.uri());
        let outcome = search(&client, "@trending", 10).await.unwrap();

        assert_eq!(outcome, SearchOutcome::ChannelNotFound);
    }

    #[tokio::test]
    async fn empty_search_hits_yield_empty_videos() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = YoutubeClient::with_base_url("k", &server.uri());
        let outcome = search(&client, "nothing matches this", 10).await.unwrap();

        assert_eq!(outcome, SearchOutcome::Videos(Vec::new()));
    }
}
