//! Provider configuration, read from the environment at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `STUDYPLAN_AI_PROVIDER` | `openai` (or `gemini`) |
//! | `OPENAI_API_KEY` / `GEMINI_API_KEY` | required for the chosen provider |
//! | `STUDYPLAN_AI_MODEL` | `gpt-4` / `gemini-1.5-flash` |
//! | `STUDYPLAN_AI_BASE_URL` | the provider's public endpoint |
//! | `STUDYPLAN_AI_JSON_MODE` | `true` |
//! | `STUDYPLAN_AI_TIMEOUT_SECS` | `60` |
//!
//! A missing key is a configuration error: the process refuses to start
//! rather than failing on every request.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AiError;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Gemini,
}

impl Provider {
    /// Environment variable holding this provider's API key.
    pub fn key_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4",
            Self::Gemini => "gemini-1.5-flash",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }
}

impl FromStr for Provider {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => Err(AiError::Config(format!("unknown AI provider: {other:?}"))),
        }
    }
}

#[derive(Clone)]
pub struct AiConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Ask the provider for strict JSON output when a caller requests JSON.
    /// When off, the JSON instruction lives in the prompt alone.
    pub json_mode: bool,
    /// Upper bound on a single model call, including the response body.
    pub timeout: Duration,
}

// Hand-written so the key never reaches a log line.
impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("json_mode", &self.json_mode)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AiConfig {
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AiError> {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let provider = match non_blank("STUDYPLAN_AI_PROVIDER") {
            Some(p) => p.parse()?,
            None => Provider::OpenAi,
        };

        let api_key = non_blank(provider.key_var()).ok_or_else(|| {
            AiError::Config(format!(
                "{} must be set to use the {} provider",
                provider.key_var(),
                provider.as_str()
            ))
        })?;

        let json_mode = match non_blank("STUDYPLAN_AI_JSON_MODE") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                AiError::Config(format!("STUDYPLAN_AI_JSON_MODE must be true or false, got {v:?}"))
            })?,
            None => true,
        };

        let timeout_secs = match non_blank("STUDYPLAN_AI_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|e| {
                AiError::Config(format!("STUDYPLAN_AI_TIMEOUT_SECS is not a number: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            api_key: api_key.trim().to_string(),
            model: non_blank("STUDYPLAN_AI_MODEL")
                .unwrap_or_else(|| provider.default_model().to_string()),
            base_url: non_blank("STUDYPLAN_AI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            json_mode,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_to_openai() {
        let config = AiConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(config.json_mode);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = AiConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AiError::Config(ref m) if m.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn blank_key_is_config_error() {
        let err = AiConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, AiError::Config(_)));
    }

    #[test]
    fn gemini_uses_its_own_key() {
        let err = AiConfig::from_lookup(lookup(&[
            ("STUDYPLAN_AI_PROVIDER", "gemini"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AiError::Config(ref m) if m.contains("GEMINI_API_KEY")));

        let config = AiConfig::from_lookup(lookup(&[
            ("STUDYPLAN_AI_PROVIDER", "Gemini"),
            ("GEMINI_API_KEY", "g-test"),
        ]))
        .unwrap();
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn overrides_are_applied() {
        let config = AiConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("STUDYPLAN_AI_MODEL", "gpt-4o-mini"),
            ("STUDYPLAN_AI_BASE_URL", "http://localhost:8080/v1/"),
            ("STUDYPLAN_AI_JSON_MODE", "off"),
            ("STUDYPLAN_AI_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert!(!config.json_mode);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = AiConfig::from_lookup(lookup(&[("STUDYPLAN_AI_PROVIDER", "bard")])).unwrap_err();
        assert!(matches!(err, AiError::Config(_)));
    }

    #[test]
    fn provider_names_parse_back() {
        for provider in [Provider::OpenAi, Provider::Gemini] {
            assert_eq!(provider.as_str().parse::<Provider>().unwrap(), provider);
        }
        assert_eq!(" Gemini ".parse::<Provider>().unwrap(), Provider::Gemini);
    }

    #[test]
    fn debug_redacts_key() {
        let config = AiConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret")])).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
