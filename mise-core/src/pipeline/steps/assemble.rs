//! Assemble stage - copies the finished state into a response.

use tracing::info_span;

use super::compose::compose_recipe;
use super::concept::generate_concept;
use crate::error::PipelineError;
use crate::llm::LlmProvider;
use crate::pipeline::Stage;
use crate::types::{RecipeResponse, WorkflowState};

/// Build the response, running any stage whose output is still missing.
///
/// Makes no model call of its own. `missing_ingredients` is empty when
/// classification never ran.
pub async fn assemble_output(
    provider: &dyn LlmProvider,
    state: WorkflowState,
) -> Result<RecipeResponse, PipelineError> {
    let state = if state.recipe_text.is_some() {
        state
    } else {
        compose_recipe(provider, state).await?
    };

    let state = if state.concept.is_some() {
        state
    } else {
        generate_concept(provider, state).await
    };

    let _span = info_span!("pipeline_stage", stage = %Stage::Assemble).entered();

    let WorkflowState {
        request,
        classified,
        concept,
        recipe_text,
    } = state;
    let concept = concept.unwrap_or_default();

    Ok(RecipeResponse {
        recipe_name: concept.name,
        ingredients_used: request.ingredients().to_vec(),
        recipe_content: recipe_text.unwrap_or_default(),
        cooking_time: concept.cooking_time,
        difficulty: concept.difficulty,
        missing_ingredients: classified
            .map(|c| c.missing_essentials)
            .unwrap_or_default(),
    })
}
