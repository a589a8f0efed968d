//! OpenAI chat completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{self, GenerationClient, ResponseFormat};
use crate::config::AiConfig;
use crate::error::AiError;

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    json_mode: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<JsonObjectFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonObjectFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        Ok(Self {
            http: client::http_client(config)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            json_mode: config.json_mode,
        })
    }

    pub(crate) fn request_body<'a>(&'a self, prompt: &'a str, format: ResponseFormat) -> ChatRequest<'a> {
        let strict_json = self.json_mode && format == ResponseFormat::Json;
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: strict_json.then_some(JsonObjectFormat { kind: "json_object" }),
        }
    }
}

/// Text of the first choice. A missing choice is a provider failure; a
/// choice with null content is an empty completion.
pub(crate) fn completion_text(response: ChatResponse) -> Result<String, AiError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content.unwrap_or_default())
        .ok_or_else(|| AiError::Generation("no choices in response".to_string()))
}

#[async_trait]
impl GenerationClient for OpenAiClient {
    fn provider(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str, format: ResponseFormat) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt, format))
            .send()
            .await
            .map_err(|e| AiError::Generation(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(client::provider_error(status, &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::Generation(format!("failed to parse response: {e}")))?;

        let text = completion_text(body)?;

        debug!(provider = "openai", model = %self.model, text_len = text.len(), raw = %text, "model response received");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Provider;

    fn config(json_mode: bool) -> AiConfig {
        AiConfig {
            provider: Provider::OpenAi,
            api_key: "sk-test".to_string(),
            model: "gpt-4".to_string(),
            base_url: Provider::OpenAi.default_base_url().to_string(),
            json_mode,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn json_request_sets_response_format() {
        let client = OpenAiClient::new(&config(true)).unwrap();
        let body = serde_json::to_value(client.request_body("hi", ResponseFormat::Json)).unwrap();
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hi");
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn text_request_omits_response_format() {
        let client = OpenAiClient::new(&config(true)).unwrap();
        let body = serde_json::to_value(client.request_body("hi", ResponseFormat::Text)).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn json_mode_off_leaves_format_to_prompt() {
        let client = OpenAiClient::new(&config(false)).unwrap();
        let body = serde_json::to_value(client.request_body("hi", ResponseFormat::Json)).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn completion_text_reads_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"09:00\":\"Study\"}"}}]}"#,
        )
        .unwrap();
        assert_eq!(completion_text(response).unwrap(), r#"{"09:00":"Study"}"#);
    }

    #[test]
    fn completion_without_choices_is_error() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(completion_text(response), Err(AiError::Generation(_))));
    }

    #[test]
    fn null_content_is_empty_text() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(completion_text(response).unwrap(), "");
    }
}
