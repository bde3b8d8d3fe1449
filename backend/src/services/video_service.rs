use crate::models::{CommentThread, HistoricalPoint, VideoDetails, VideoSummary};
use crate::services::youtube_service::YoutubeClient;
use crate::utils::{engagement_rate, format_duration, parse_count};
use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::Value;

/// Length of the synthetic history window, in days back from today.
pub const HISTORY_DAYS: i64 = 30;

pub async fn get_video(yt: &YoutubeClient, video_id: &str) -> Result<Option<VideoDetails>> {
    let items = yt
        .list_videos(
            &[video_id.to_string()],
            "snippet,statistics,contentDetails",
        )
        .await?;

    Ok(items.first().map(video_details_from_item))
}

pub async fn get_comments(
    yt: &YoutubeClient,
    video_id: &str,
    max_results: u32,
) -> Result<Vec<CommentThread>> {
    let items = yt.comment_threads(video_id, max_results).await?;
    Ok(items.iter().map(comment_thread_from_item).collect())
}

/// Current stats scaled back over a 31-day window. None when the video does
/// not exist.
pub async fn get_history(
    yt: &YoutubeClient,
    video_id: &str,
) -> Result<Option<Vec<HistoricalPoint>>> {
    let items = yt.list_videos(&[video_id.to_string()], "statistics").await?;
    let Some(item) = items.first() else {
        return Ok(None);
    };

    let views = parse_count(&item["statistics"]["viewCount"]);
    let likes = parse_count(&item["statistics"]["likeCount"]);
    let comments = parse_count(&item["statistics"]["commentCount"]);

    Ok(Some(build_history(
        views,
        likes,
        comments,
        Utc::now().date_naive(),
    )))
}

/// Batch lookup with per-row engagement derivation. Unknown IDs are simply
/// absent from the result.
pub async fn compare_videos(yt: &YoutubeClient, video_ids: &[String]) -> Result<Vec<VideoSummary>> {
    let items = yt.list_videos(video_ids, "snippet,statistics").await?;
    Ok(items.iter().map(video_summary_from_item).collect())
}

/// Fabricate the day-by-day series by linear back-scaling: day `i` before
/// today carries factor (30-i)/30 of the current totals. Not real data.
pub fn build_history(
    views: u64,
    likes: u64,
    comments: u64,
    today: NaiveDate,
) -> Vec<HistoricalPoint> {
    let mut points = Vec::with_capacity(HISTORY_DAYS as usize + 1);

    for i in (0..=HISTORY_DAYS).rev() {
        let date = today - Duration::days(i);
        let factor = (HISTORY_DAYS - i) as f64 / HISTORY_DAYS as f64;

        points.push(HistoricalPoint {
            date: date.format("%Y-%m-%d").to_string(),
            views: (views as f64 * factor).floor() as u64,
            likes: (likes as f64 * factor).floor() as u64,
            comments: (comments as f64 * factor).floor() as u64,
        });
    }

    points
}

pub fn video_summary_from_item(item: &Value) -> VideoSummary {
    let views = parse_count(&item["statistics"]["viewCount"]);
    let likes = parse_count(&item["statistics"]["likeCount"]);
    let comments = parse_count(&item["statistics"]["commentCount"]);

    VideoSummary {
        id: item["id"].as_str().unwrap_or("").to_string(),
        title: item["snippet"]["title"].as_str().unwrap_or("").to_string(),
        description: item["snippet"]["description"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        published_at: item["snippet"]["publishedAt"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        channel_title: item["snippet"]["channelTitle"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        thumbnail_url: item["snippet"]["thumbnails"]["medium"]["url"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        view_count: views,
        like_count: likes,
        comment_count: comments,
        engagement_rate: engagement_rate(likes, comments, views),
    }
}

pub fn video_details_from_item(item: &Value) -> VideoDetails {
    let summary = video_summary_from_item(item);
    let duration = item["contentDetails"]["duration"]
        .as_str()
        .unwrap_or("")
        .to_string();

    VideoDetails {
        id: summary.id,
        title: summary.title,
        description: summary.description,
        published_at: summary.published_at,
        channel_title: summary.channel_title,
        thumbnail_url: summary.thumbnail_url,
        duration_display: format_duration(&duration),
        duration,
        view_count: summary.view_count,
        like_count: summary.like_count,
        comment_count: summary.comment_count,
        engagement_rate: summary.engagement_rate,
    }
}

pub fn comment_thread_from_item(item: &Value) -> CommentThread {
    let snippet = &item["snippet"]["topLevelComment"]["snippet"];

    CommentThread {
        id: item["id"].as_str().unwrap_or("").to_string(),
        author: snippet["authorDisplayName"].as_str().unwrap_or("").to_string(),
        author_profile_image_url: snippet["authorProfileImageUrl"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        text: snippet["textDisplay"].as_str().unwrap_or("").to_string(),
        like_count: parse_count(&snippet["likeCount"]),
        published_at: snippet["publishedAt"].as_str().unwrap_or("").to_string(),
        reply_count: parse_count(&item["snippet"]["totalReplyCount"]),
    }
}
