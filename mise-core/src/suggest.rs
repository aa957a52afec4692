//! Single-call recipe suggestion, bypassing the staged pipeline.
//!
//! Useful as a smoke check of the model gateway: one prompt, one call, the
//! model's text returned as-is.

use std::time::Instant;

use tracing::{info_span, Instrument};

use crate::llm::{LlmError, LlmProvider};
use crate::prompts::suggest::SUGGEST_PROMPT_NAME;
use crate::prompts::{render_suggest_system_prompt, render_suggest_user_prompt};
use crate::types::RecipeRequest;

/// Ask the model for a complete meal suggestion in one call.
///
/// The free-text query is not part of this prompt. Provider errors are
/// returned unchanged.
pub async fn suggest_recipe(
    provider: &dyn LlmProvider,
    request: &RecipeRequest,
) -> Result<String, LlmError> {
    async move {
        let start = Instant::now();

        let system = render_suggest_system_prompt();
        let user = render_suggest_user_prompt(
            request.ingredients(),
            request.dietary_restrictions(),
            request.preferences(),
        );

        let text = provider.complete(&system, &user).await.map_err(|e| {
            tracing::error!(prompt = SUGGEST_PROMPT_NAME, error = %e, "Suggestion failed");
            e
        })?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis() as u64,
            chars = text.len(),
            "Suggestion completed"
        );

        Ok(text)
    }
    .instrument(info_span!("suggest_recipe", model = provider.model_name()))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use serde_json::Map;

    fn request() -> RecipeRequest {
        RecipeRequest::new(
            vec!["chicken breast".to_string(), "rice".to_string()],
            vec!["dairy-free".to_string()],
            Map::new(),
            Some("ignored here".to_string()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_single_call_returns_text_verbatim() {
        let provider = FakeProvider::with_recipe_responses();

        let text = suggest_recipe(&provider, &request()).await.unwrap();

        assert!(text.starts_with("Chicken Fried Rice"));
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].system.contains("cooking assistant"));
        assert!(calls[0].user.starts_with("I have these ingredients: chicken breast, rice. "));
        assert!(calls[0].user.contains("Dietary restrictions: dairy-free. "));
        assert!(!calls[0].user.contains("ignored here"));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = FakeProvider::new().fail_on("cooking assistant");

        let err = suggest_recipe(&provider, &request()).await.unwrap_err();

        assert!(matches!(err, LlmError::RequestFailed(_)));
    }
}
