//! Model gateway: a trait-based abstraction over hosted text-completion
//! providers, with a deterministic fake for tests and offline runs.

mod claude;
mod fake;

pub use claude::ClaudeProvider;
pub use fake::{FakeProvider, RecordedCall};

use crate::config::{ConfigError, LlmConfig};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error type for model gateway operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

/// Trait for chat-style completion providers.
///
/// Implementations must be thread-safe: one provider is shared by every
/// concurrent pipeline run. There is no retry and no streaming; a provider
/// failure is returned to the caller unchanged.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a system instruction and a user message, get the model's text back.
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "claude", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "claude-3-5-sonnet-20241022").
    fn model_name(&self) -> &str;
}

/// Create a provider based on environment configuration.
///
/// `MISE_PROVIDER` selects the implementation: `claude` (default, needs
/// `ANTHROPIC_API_KEY`) or `fake` (canned recipe responses, no network).
pub fn create_provider_from_env() -> Result<Arc<dyn LlmProvider>, ConfigError> {
    create_provider_from_lookup(|name| std::env::var(name).ok())
}

/// [`create_provider_from_env`] over an arbitrary variable lookup.
pub fn create_provider_from_lookup<F>(lookup: F) -> Result<Arc<dyn LlmProvider>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = lookup("MISE_PROVIDER").unwrap_or_else(|| "claude".to_string());

    match provider.trim() {
        "claude" => Ok(Arc::new(ClaudeProvider::new(LlmConfig::from_lookup(&lookup)?))),
        "fake" => Ok(Arc::new(FakeProvider::with_recipe_responses())),
        other => Err(ConfigError::InvalidValue {
            var: "MISE_PROVIDER".to_string(),
            value: other.to_string(),
        }),
    }
}
