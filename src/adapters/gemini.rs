use crate::domain::ports::TextGenerator;
use crate::utils::error::{RadarError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini `generateContent` REST endpoint.
///
/// The request timeout lives on the reqwest client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        credential: &str,
        model: &str,
        prompt: &str,
    ) -> Result<Option<String>> {
        let url = self.url_for(model);
        tracing::debug!("Making generation request to: {}", url);

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Generation response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RadarError::GenerationError {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path(PATH)
                .header("x-goog-api-key", "test-key")
                .body_contains("Draft a brief");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [{
                        "content": {"parts": [{"text": "## Brief"}, {"text": "\nBody"}]}
                    }]
                }));
        });

        let text = client_for(&server)
            .generate("test-key", "gemini-2.5-flash", "Draft a brief")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(text.as_deref(), Some("## Brief\nBody"));
    }

    #[tokio::test]
    async fn test_generate_without_candidates_is_empty() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"candidates": []}));
        });

        let text = client_for(&server)
            .generate("test-key", "gemini-2.5-flash", "prompt")
            .await
            .unwrap();

        api_mock.assert();
        assert!(text.is_none());
    }

    #[tokio::test]
    async fn test_generate_maps_error_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(429).body("RESOURCE_EXHAUSTED");
        });

        let result = client_for(&server)
            .generate("test-key", "gemini-2.5-flash", "prompt")
            .await;

        api_mock.assert();
        match result {
            Err(RadarError::GenerationError { status, message }) => {
                assert_eq!(status, 429);
                assert!(message.contains("RESOURCE_EXHAUSTED"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).body("not json");
        });

        let result = client_for(&server)
            .generate("test-key", "gemini-2.5-flash", "prompt")
            .await;

        api_mock.assert();
        assert!(matches!(result, Err(RadarError::SerializationError(_))));
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let client = GeminiClient::new("http://localhost:9/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url_for("m"),
            "http://localhost:9/v1beta/models/m:generateContent"
        );
    }
}
