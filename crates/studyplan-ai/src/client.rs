//! The generation client seam.
//!
//! Every provider implements [`GenerationClient`]; the schedule service only
//! ever sees `Arc<dyn GenerationClient>`, so tests can substitute a client
//! that returns canned text without touching the network.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{AiConfig, Provider};
use crate::error::AiError;
use crate::gemini::GeminiClient;
use crate::openai::OpenAiClient;

/// What the caller expects back from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// A JSON object. Clients with `json_mode` enabled ask the provider to
    /// enforce it; the output is still not guaranteed to be valid JSON.
    Json,
    /// Free prose.
    Text,
}

/// A text-generation model reachable over the network.
///
/// `complete` suspends until the provider answers or fails. Failures are
/// returned as [`AiError::Generation`] with the provider's message. No
/// retries happen at this layer.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Provider name used in log events, e.g. `"openai"`.
    fn provider(&self) -> &str;

    async fn complete(&self, prompt: &str, format: ResponseFormat) -> Result<String, AiError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn GenerationClient) {}
};

/// Build the client for the configured provider.
pub fn build_client(config: &AiConfig) -> Result<Arc<dyn GenerationClient>, AiError> {
    let client: Arc<dyn GenerationClient> = match config.provider {
        Provider::OpenAi => Arc::new(OpenAiClient::new(config)?),
        Provider::Gemini => Arc::new(GeminiClient::new(config)?),
    };
    Ok(client)
}

/// Shared HTTP client construction. The configured timeout is the only time
/// bound on a model call.
pub(crate) fn http_client(config: &AiConfig) -> Result<reqwest::Client, AiError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| AiError::Config(format!("failed to create HTTP client: {e}")))
}

/// Error envelope used by both OpenAI and Gemini: `{"error": {"message": ...}}`.
#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

/// Turn a non-success response body into a generation error, preferring the
/// provider's own message.
pub(crate) fn provider_error(status: reqwest::StatusCode, body: &str) -> AiError {
    let message = serde_json::from_str::<ProviderErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            }
        });
    AiError::Generation(format!("{status}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_prefers_structured_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let err = provider_error(reqwest::StatusCode::UNAUTHORIZED, body);
        assert_eq!(
            err.provider_message(),
            Some("401 Unauthorized: Incorrect API key provided")
        );
    }

    #[test]
    fn provider_error_falls_back_to_raw_body() {
        let err = provider_error(reqwest::StatusCode::BAD_GATEWAY, "  upstream timeout \n");
        assert_eq!(err.provider_message(), Some("502 Bad Gateway: upstream timeout"));

        let err = provider_error(reqwest::StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.provider_message(), Some("502 Bad Gateway: no response body"));
    }
}
