//! Minimal client for the Gemini `generateContent` REST endpoint.

use crate::config::GeminiSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("request to language service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("language service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("language service returned no text")]
    EmptyResponse,
}

/// Upstream error bodies are cut to this many bytes before they reach clients
pub const MAX_ERROR_BODY_BYTES: usize = 256;

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, all parts joined
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, settings: &GeminiSettings) -> Result<Self, GeminiError> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.api_base.trim_end_matches('/'),
            settings.model
        );

        Ok(Self {
            http_client,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one prompt and return the generated text verbatim
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        tracing::debug!("Calling language service at {}", self.endpoint);

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Language service error body: {}", body);
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.into_text().ok_or(GeminiError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_format() {
        let settings = GeminiSettings {
            api_base: "http://localhost:9999/".to_string(),
            ..Default::default()
        };
        let client = GeminiClient::new("key", &settings).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_error_body_truncated() {
        assert_eq!(truncate_body("short"), "short");

        let long = "x".repeat(5000);
        let cut = truncate_body(&long);
        assert_eq!(cut.len(), MAX_ERROR_BODY_BYTES + 3);
        assert!(cut.ends_with("..."));

        // multi-byte characters straddling the limit are not split
        let wide = "é".repeat(MAX_ERROR_BODY_BYTES);
        let cut = truncate_body(&wide);
        assert!(cut.len() <= MAX_ERROR_BODY_BYTES + 3);
        assert!(cut.trim_end_matches("...").chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"contents": [{"parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Stay "}, {"text": "alert."}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("Stay alert."));
    }

    #[test]
    fn test_response_without_text() {
        let blocked: GenerateResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(blocked.into_text().is_none());

        let no_content: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(no_content.into_text().is_none());
    }
}
