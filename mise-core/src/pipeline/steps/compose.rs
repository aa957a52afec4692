//! Compose stage - writes the full recipe text.

use std::time::Instant;

use tracing::{info_span, Instrument};

use super::concept::generate_concept;
use crate::error::PipelineError;
use crate::llm::LlmProvider;
use crate::pipeline::Stage;
use crate::prompts::compose::COMPOSE_PROMPT_NAME;
use crate::prompts::{render_compose_system_prompt, render_compose_user_prompt};
use crate::types::{RecipeConcept, WorkflowState};

/// Write the recipe prose, generating a concept first if needed.
///
/// The model's text is stored verbatim. Unlike the classify and concept
/// stages there is no fallback: a provider error aborts the run.
pub async fn compose_recipe(
    provider: &dyn LlmProvider,
    state: WorkflowState,
) -> Result<WorkflowState, PipelineError> {
    let state = if state.concept.is_some() {
        state
    } else {
        generate_concept(provider, state).await
    };

    let stage = Stage::Compose;

    async move {
        let start = Instant::now();
        let request = &state.request;
        let default_concept = RecipeConcept::default();
        let concept = state.concept.as_ref().unwrap_or(&default_concept);
        let missing_essentials = state
            .classified
            .as_ref()
            .map(|c| c.missing_essentials.as_slice())
            .unwrap_or_default();

        let system = render_compose_system_prompt();
        let user = render_compose_user_prompt(
            concept,
            request.ingredients(),
            missing_essentials,
            request.dietary_restrictions(),
            request.query(),
        );

        let recipe_text = match provider.complete(&system, &user).await {
            Ok(text) => text,
            Err(source) => {
                tracing::error!(
                    prompt = COMPOSE_PROMPT_NAME,
                    error = %source,
                    "Recipe composition failed"
                );
                return Err(PipelineError::Provider { stage, source });
            }
        };

        tracing::info!(
            duration_ms = start.elapsed().as_millis() as u64,
            recipe_chars = recipe_text.len(),
            "Stage completed"
        );

        Ok(state.with_recipe_text(recipe_text))
    }
    .instrument(info_span!("pipeline_stage", stage = %stage))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use crate::types::{ClassifiedIngredients, RecipeRequest};

    fn ready_state(query: Option<&str>) -> WorkflowState {
        let request = RecipeRequest::new(
            vec!["pasta".to_string(), "tomato".to_string()],
            Vec::new(),
            Default::default(),
            query.map(str::to_string),
        )
        .unwrap();
        let classified = ClassifiedIngredients {
            main_ingredients: request.ingredients().to_vec(),
            missing_essentials: vec!["salt".to_string()],
            ..Default::default()
        };
        WorkflowState::new(request)
            .with_classified(classified)
            .with_concept(RecipeConcept::default())
    }

    #[tokio::test]
    async fn test_stores_model_text_verbatim() {
        let text = "```json\n{\"not\": \"parsed\"}\n```\nBoil pasta.";
        let provider = FakeProvider::with_response("complete recipe", text);

        let state = compose_recipe(&provider, ready_state(None)).await.unwrap();

        assert_eq!(state.recipe_text.as_deref(), Some(text));
    }

    #[tokio::test]
    async fn test_prompt_carries_staples_and_query() {
        let provider = FakeProvider::with_response("complete recipe", "Recipe");

        compose_recipe(&provider, ready_state(Some("no oven")))
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].user.contains("Recipe: Custom Recipe"));
        assert!(calls[0].user.contains("Assumed kitchen staples: salt"));
        assert!(calls[0].user.contains("Additional requirements: no oven"));
    }

    #[tokio::test]
    async fn test_provider_error_aborts() {
        let provider = FakeProvider::new().fail_on("complete recipe");

        let err = compose_recipe(&provider, ready_state(None))
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Compose);
        assert!(err.to_string().contains("simulated failure"));
    }

    #[tokio::test]
    async fn test_runs_missing_upstream_stages() {
        let provider = FakeProvider::with_recipe_responses();
        let request = RecipeRequest::from_ingredients(["pasta"]).unwrap();

        let state = compose_recipe(&provider, WorkflowState::new(request))
            .await
            .unwrap();

        assert!(state.classified.is_some());
        assert_eq!(
            state.concept.as_ref().map(|c| c.name.as_str()),
            Some("Lemon Garlic Chicken Traybake")
        );
        assert!(state.recipe_text.unwrap().contains("## Instructions"));
        assert_eq!(provider.calls().len(), 3);
    }
}
