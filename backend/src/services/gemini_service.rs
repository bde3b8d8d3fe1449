use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Single-shot client for the Gemini generateContent endpoint. No streaming,
/// no chat history, no retries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        GeminiClient {
            http: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn model_path(&self) -> String {
        let model = self.model.trim();
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    /// Submit a prompt and return the concatenated candidate text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model_path());
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(anyhow!("Gemini error (status {}): {body}", status.as_u16()));
        }

        let json: Value = serde_json::from_str(&body)?;
        Ok(extract_candidate_text(&json))
    }
}

/// True when an upstream failure looks like a credential/permissions problem
/// with the model API key; the HTTP surface special-cases this message.
pub fn is_api_key_error(err: &anyhow::Error) -> bool {
    err.to_string().contains("API key")
}

fn extract_candidate_text(json: &Value) -> String {
    let mut out = String::new();
    let candidates = json["candidates"].as_array().cloned().unwrap_or_default();
    for candidate in candidates {
        let parts = candidate["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        for part in parts {
            if let Some(text) = part["text"].as_str() {
                out.push_str(text);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn extracts_text_across_candidates_and_parts() {
        let json = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] } },
                { "content": { "parts": [{ "text": "!" }] } }
            ]
        });
        assert_eq!(extract_candidate_text(&json), "Hello world!");
    }

    #[test]
    fn extracts_empty_string_when_no_candidates() {
        assert_eq!(extract_candidate_text(&json!({})), "");
    }

    #[tokio::test]
    async fn generate_posts_prompt_and_returns_text() {
        let server = MockServer::start().await;

        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "A thorough analysis." }] } }
            ]
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "model-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("model-key", "gemini-1.5-flash", &server.uri());
        let text = client.generate("analyze this").await.expect("should parse");

        assert_eq!(text, "A thorough analysis.");
    }

    #[tokio::test]
    async fn error_status_surfaces_response_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "API key not valid. Please pass a valid API key." }
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("bad-key", "gemini-1.5-flash", &server.uri());
        let err = client.generate("prompt").await.expect_err("must fail");

        assert!(err.to_string().contains("API key not valid"));
        assert!(is_api_key_error(&err));
    }
}
