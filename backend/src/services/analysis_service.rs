use crate::models::{AiAnalysis, AnalysisType, VideoDetails};
use crate::services::gemini_service::GeminiClient;
use crate::services::video_service::{comment_thread_from_item, get_video};
use crate::services::youtube_service::YoutubeClient;
use anyhow::Result;
use log::{info, warn};

/// How many comments are sampled into the prompt for context.
const COMMENT_SAMPLE_SIZE: u32 = 10;

/// Fetch metadata, sample comments best-effort, build the prompt and submit
/// it to the model. None when the video does not exist.
pub async fn analyze(
    yt: &YoutubeClient,
    gemini: &GeminiClient,
    video_id: &str,
    analysis_type: AnalysisType,
) -> Result<Option<AiAnalysis>> {
    let Some(video) = get_video(yt, video_id).await? else {
        return Ok(None);
    };
    info!("Video details retrieved for: {}", video.title);

    // Comments are context only; a failed fetch (comments disabled, quota)
    // must not fail the analysis.
    let comment_texts = match yt.comment_threads(video_id, COMMENT_SAMPLE_SIZE).await {
        Ok(items) => items
            .iter()
            .map(|item| comment_thread_from_item(item).text)
            .collect::<Vec<_>>()
            .join("\n\n"),
        Err(e) => {
            warn!("Could not retrieve comments for {video_id}, possibly disabled: {e}");
            String::new()
        }
    };

    let prompt = build_prompt(&video, &comment_texts, analysis_type);
    let analysis = gemini.generate(&prompt).await?;

    Ok(Some(AiAnalysis {
        video_id: video_id.to_string(),
        analysis_type,
        analysis,
    }))
}

/// Assemble the model prompt from video metadata and sampled comments.
/// Pure; no network involved.
pub fn build_prompt(video: &VideoDetails, comment_texts: &str, analysis_type: AnalysisType) -> String {
    match analysis_type {
        AnalysisType::Content => format!(
            "Analyze the content of this YouTube video based on its metadata:\n\n\
             Title: {}\n\
             Description: {}\n\
             Channel: {}\n\
             Published: {}\n\
             Views: {}\n\
             Likes: {}\n\
             Comments: {}\n\n\
             Sample comments:\n{}\n\n\
             Provide a detailed content analysis including:\n\
             1. Main topics and themes\n\
             2. Target audience\n\
             3. Content quality assessment\n\
             4. Potential content improvements\n\
             5. SEO recommendations",
            video.title,
            video.description,
            video.channel_title,
            video.published_at,
            video.view_count,
            video.like_count,
            video.comment_count,
            comment_texts,
        ),
        AnalysisType::Engagement => format!(
            "Analyze the engagement metrics of this YouTube video:\n\n\
             Title: {}\n\
             Channel: {}\n\
             Views: {}\n\
             Likes: {}\n\
             Comments: {}\n\
             Engagement Rate: {:.2}%\n\n\
             Provide an engagement analysis including:\n\
             1. Engagement rate assessment compared to typical YouTube videos\n\
             2. Factors that might be affecting engagement\n\
             3. Recommendations to improve engagement\n\
             4. Audience retention strategies\n\
             5. Call-to-action effectiveness",
            video.title,
            video.channel_title,
            video.view_count,
            video.like_count,
            video.comment_count,
            video.engagement_rate,
        ),
        AnalysisType::Growth => format!(
            "Analyze the growth potential of this YouTube video:\n\n\
             Title: {}\n\
             Description: {}\n\
             Channel: {}\n\
             Published: {}\n\
             Views: {}\n\
             Likes: {}\n\
             Comments: {}\n\n\
             Provide a growth potential analysis including:\n\
             1. Viral potential assessment\n\
             2. Recommendations for increasing reach\n\
             3. Cross-platform promotion strategies\n\
             4. Collaboration opportunities\n\
             5. Content series potential",
            video.title,
            video.description,
            video.channel_title,
            video.published_at,
            video.view_count,
            video.like_count,
            video.comment_count,
        ),
        AnalysisType::General => format!(
            "Analyze this YouTube video based on its metadata:\n\n\
             Title: {}\n\
             Description: {}\n\
             Channel: {}\n\
             Published: {}\n\
             Views: {}\n\
             Likes: {}\n\
             Comments: {}\n\n\
             Sample comments:\n{}\n\n\
             Provide a comprehensive analysis including:\n\
             1. Content summary and quality assessment\n\
             2. Audience and engagement analysis\n\
             3. Performance evaluation compared to similar videos\n\
             4. Strengths and weaknesses\n\
             5. Recommendations for improvement",
            video.title,
            video.description,
            video.channel_title,
            video.published_at,
            video.view_count,
            video.like_count,
            video.comment_count,
            comment_texts,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_video() -> VideoDetails {
        VideoDetails {
            id: "abc".to_string(),
            title: "How to solder".to_string(),
            description: "A soldering walkthrough".to_string(),
            published_at: "2025-03-01T12:00:00Z".to_string(),
            channel_title: "Workbench".to_string(),
            thumbnail_url: "http://img/abc.jpg".to_string(),
            duration: "PT12M30S".to_string(),
            duration_display: "12:30".to_string(),
            view_count: 40_000,
            like_count: 900,
            comment_count: 100,
            engagement_rate: 2.5,
        }
    }

    #[test]
    fn general_prompt_embeds_metadata_and_comments() {
        let prompt = build_prompt(&sample_video(), "first!\n\nnice one", AnalysisType::General);
        assert!(prompt.contains("Title: How to solder"));
        assert!(prompt.contains("Channel: Workbench"));
        assert!(prompt.contains("Views: 40000"));
        assert!(prompt.contains("first!"));
        assert!(prompt.contains("comprehensive analysis"));
    }

    #[test]
    fn engagement_prompt_embeds_the_derived_rate() {
        let prompt = build_prompt(&sample_video(), "", AnalysisType::Engagement);
        assert!(prompt.contains("Engagement Rate: 2.50%"));
        assert!(prompt.contains("engagement analysis"));
    }

    #[test]
    fn prompts_differ_per_analysis_type() {
        let video = sample_video();
        let content = build_prompt(&video, "", AnalysisType::Content);
        let growth = build_prompt(&video, "", AnalysisType::Growth);
        assert!(content.contains("SEO recommendations"));
        assert!(growth.contains("Viral potential assessment"));
        assert_ne!(content, growth);
    }

    #[test]
    fn prompt_builds_with_empty_comment_sample() {
        let prompt = build_prompt(&sample_video(), "", AnalysisType::General);
        assert!(prompt.contains("Sample comments:\n\n"));
    }

    fn video_list_body() -> serde_json::Value {
        json!({
            "items": [{
                "id": "abc",
                "snippet": {
                    "title": "How to solder",
                    "description": "A soldering walkthrough",
                    "publishedAt": "2025-03-01T12:00:00Z",
                    "channelTitle": "Workbench",
                    "thumbnails": { "medium": { "url": "http://img/abc.jpg" } }
                },
                "statistics": { "viewCount": "40000", "likeCount": "900", "commentCount": "100" },
                "contentDetails": { "duration": "PT12M30S" }
            }]
        })
    }

    #[tokio::test]
    async fn analysis_survives_disabled_comments() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(video_list_body()))
            .mount(&server)
            .await;
        // commentThreads.list fails the way it does when comments are off.
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "message": "commentsDisabled" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Looks solid." }] } }]
            })))
            .mount(&server)
            .await;

        let yt = YoutubeClient::with_base_url("k", &server.uri());
        let gemini = GeminiClient::with_base_url("g", "gemini-1.5-flash", &server.uri());

        let result = analyze(&yt, &gemini, "abc", AnalysisType::General)
            .await
            .expect("comment failure must be swallowed")
            .expect("video exists");

        assert_eq!(result.video_id, "abc");
        assert_eq!(result.analysis, "Looks solid.");
    }

    #[tokio::test]
    async fn analysis_returns_none_for_missing_video() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let yt = YoutubeClient::with_base_url("k", &server.uri());
        let gemini = GeminiClient::with_base_url("g", "gemini-1.5-flash", &server.uri());

        let result = analyze(&yt, &gemini, "missing", AnalysisType::General)
            .await
            .expect("no error");
        assert!(result.is_none());
    }
}
