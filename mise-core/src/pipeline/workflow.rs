//! Workflow orchestrator.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info_span, Instrument};

use crate::error::PipelineError;
use crate::llm::LlmProvider;
use crate::pipeline::steps::{
    assemble_output, classify_ingredients, compose_recipe, generate_concept,
};
use crate::types::{RecipeRequest, RecipeResponse, WorkflowState};

/// Runs the four stages in order for one request at a time.
///
/// Cheap to clone; the provider is shared between runs but every run gets
/// its own [`WorkflowState`].
#[derive(Clone)]
pub struct Workflow {
    provider: Arc<dyn LlmProvider>,
}

impl Workflow {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Run classify, concept, compose and assemble for `request`.
    pub async fn run(&self, request: RecipeRequest) -> Result<RecipeResponse, PipelineError> {
        let provider = self.provider.as_ref();
        let ingredient_count = request.ingredients().len();

        async move {
            let start = Instant::now();

            let state = WorkflowState::new(request);
            let state = classify_ingredients(provider, state).await;
            let state = generate_concept(provider, state).await;
            let state = compose_recipe(provider, state).await?;
            let response = assemble_output(provider, state).await?;

            tracing::info!(
                duration_ms = start.elapsed().as_millis() as u64,
                recipe_name = %response.recipe_name,
                "Workflow completed"
            );

            Ok(response)
        }
        .instrument(info_span!(
            "workflow",
            provider = provider.provider_name(),
            model = provider.model_name(),
            ingredients = ingredient_count,
        ))
        .await
    }
}

impl fmt::Debug for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.provider.model_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;

    #[tokio::test]
    async fn test_run_makes_three_model_calls() {
        let provider = Arc::new(FakeProvider::with_recipe_responses());
        let workflow = Workflow::new(provider.clone());

        let request = RecipeRequest::from_ingredients(["chicken breast", "lemon"]).unwrap();
        let response = workflow.run(request).await.unwrap();

        assert_eq!(provider.calls().len(), 3);
        assert_eq!(response.ingredients_used, vec!["chicken breast", "lemon"]);
        assert_eq!(response.cooking_time, "45 minutes");
    }

    #[test]
    fn test_debug_shows_provider() {
        let workflow = Workflow::new(Arc::new(FakeProvider::new()));
        let debug = format!("{:?}", workflow);
        assert!(debug.contains("fake-model"));
    }
}
