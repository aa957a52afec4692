//! Claude (Anthropic) LLM provider.

use super::{LlmError, LlmProvider};
use crate::config::{ConfigError, LlmConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API provider.
#[derive(Debug)]
pub struct ClaudeProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Create a new ClaudeProvider from an already-validated config.
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider from environment configuration.
    ///
    /// Fails immediately when `ANTHROPIC_API_KEY` is missing; no request is
    /// ever attempted without a credential.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = LlmConfig::from_env()?;
        Ok(Self::new(config))
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    fn build_request(&self, system: &str, user: &str) -> ClaudeRequest {
        ClaudeRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system: (!system.is_empty()).then(|| system.to_string()),
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        }
    }
}

/// Claude API request format.
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

/// Claude API response format.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiError {
    message: String,
}

/// Error response from Claude API.
#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
    error: ClaudeApiError,
}

/// Pull the first text block out of a successful response body.
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: ClaudeResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError(e.to_string()))?;

    response
        .content
        .into_iter()
        .find_map(|c| {
            if c.content_type == "text" {
                c.text
            } else {
                None
            }
        })
        .ok_or_else(|| LlmError::ParseError("No text content in response".to_string()))
}

/// Map a non-200 response body onto an `ApiError`.
fn parse_api_error(status: u16, body: String) -> LlmError {
    match serde_json::from_str::<ClaudeErrorResponse>(&body) {
        Ok(error_response) => LlmError::ApiError {
            status,
            message: error_response.error.message,
        },
        Err(_) => LlmError::ApiError {
            status,
            message: body,
        },
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = self.build_request(system, user);

        tracing::debug!(
            model = %self.config.model,
            system_chars = system.len(),
            user_chars = user.len(),
            "Calling Claude API"
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if status != 200 {
            return Err(parse_api_error(status, body));
        }

        parse_completion(&body)
    }

    fn provider_name(&self) -> &'static str {
        "claude"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
