//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{self, GenerationClient, ResponseFormat};
use crate::config::AiConfig;
use crate::error::AiError;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    json_mode: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        Ok(Self {
            http: client::http_client(config)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            json_mode: config.json_mode,
        })
    }

    pub(crate) fn request_body<'a>(&self, prompt: &'a str, format: ResponseFormat) -> GenerateRequest<'a> {
        let strict_json = self.json_mode && format == ResponseFormat::Json;
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: strict_json.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        }
    }
}

/// Concatenated text parts of the first candidate.
pub(crate) fn candidate_text(response: GenerateResponse) -> Result<String, AiError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AiError::Generation("no candidates in response".to_string()))?;

    Ok(candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default())
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn provider(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str, format: ResponseFormat) -> Result<String, AiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(prompt, format))
            .send()
            .await
            // Strip the URL: it carries the key as a query parameter.
            .map_err(|e| AiError::Generation(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(client::provider_error(status, &body));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::Generation(format!("failed to parse response: {}", e.without_url())))?;

        let text = candidate_text(body)?;

        debug!(provider = "gemini", model = %self.model, text_len = text.len(), raw = %text, "model response received");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Provider;

    fn client(json_mode: bool) -> GeminiClient {
        GeminiClient::new(&AiConfig {
            provider: Provider::Gemini,
            api_key: "g-test".to_string(),
            model: "gemini-1.5-flash".to_string(),
            base_url: Provider::Gemini.default_base_url().to_string(),
            json_mode,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn json_request_sets_mime_type() {
        let body = serde_json::to_value(client(true).request_body("plan", ResponseFormat::Json)).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "plan");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn text_request_has_no_generation_config() {
        let body = serde_json::to_value(client(true).request_body("plan", ResponseFormat::Text)).unwrap();
        assert!(body.get("generationConfig").is_none());

        let body = serde_json::to_value(client(false).request_body("plan", ResponseFormat::Json)).unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn candidate_parts_are_joined() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "{\"09:00\":"}, {"text": "\"Study\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(candidate_text(response).unwrap(), r#"{"09:00":"Study"}"#);
    }

    #[test]
    fn missing_candidates_is_error() {
        let response: GenerateResponse = serde_json::from_str(r#"{"promptFeedback": {}}"#).unwrap();
        assert!(matches!(candidate_text(response), Err(AiError::Generation(_))));
    }

    #[test]
    fn candidate_without_content_is_empty_text() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(candidate_text(response).unwrap(), "");
    }
}
