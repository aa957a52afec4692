//! Model configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default Anthropic API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default cap on generated tokens per call.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}

/// Model gateway configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Anthropic API key.
    pub api_key: String,
    /// Model identifier (e.g., "claude-3-5-sonnet-20241022").
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output tokens per completion.
    pub max_tokens: u32,
    /// Base URL for the API.
    pub base_url: String,
}

impl LlmConfig {
    /// Build a config with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `ANTHROPIC_API_KEY`: API key for Anthropic
    ///
    /// Optional:
    /// - `MODEL_NAME`: Model name (default: "claude-3-5-sonnet-20241022")
    /// - `TEMPERATURE`: Sampling temperature (default: 0.7)
    /// - `MAX_TOKENS`: Maximum output tokens (default: 1024)
    /// - `ANTHROPIC_BASE_URL`: API base URL (default: "https://api.anthropic.com")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("ANTHROPIC_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string()))?;

        let model = lookup("MODEL_NAME")
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = parse_var(&lookup, "TEMPERATURE", DEFAULT_TEMPERATURE)?;
        let max_tokens = parse_var(&lookup, "MAX_TOKENS", DEFAULT_MAX_TOKENS)?;

        let base_url = lookup("ANTHROPIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            temperature,
            max_tokens,
            base_url,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key() {
        let err = LlmConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string())
        );
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let err = LlmConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_defaults() {
        let config = LlmConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "claude-3-5-sonnet-20241022");
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_blank_model_name_uses_default() {
        let config = LlmConfig::from_lookup(lookup_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("MODEL_NAME", ""),
        ]))
        .unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_overrides() {
        let config = LlmConfig::from_lookup(lookup_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("MODEL_NAME", "claude-3-haiku"),
            ("TEMPERATURE", "0.2"),
            ("MAX_TOKENS", "2048"),
            ("ANTHROPIC_BASE_URL", "http://localhost:9999/"),
        ]))
        .unwrap();
        assert_eq!(config.model, "claude-3-haiku");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_invalid_number() {
        let err = LlmConfig::from_lookup(lookup_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("MAX_TOKENS", "lots"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: "MAX_TOKENS".to_string(),
                value: "lots".to_string(),
            }
        );
    }
}
