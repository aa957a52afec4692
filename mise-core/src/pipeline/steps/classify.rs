//! Classify stage - sorts the request's ingredients into food groups.

use std::time::Instant;

use tracing::{info_span, Instrument};

use crate::extract::{string_list_field, try_extract_json, JsonMap};
use crate::llm::LlmProvider;
use crate::pipeline::{Degrade, Stage};
use crate::prompts::classify::CLASSIFY_PROMPT_NAME;
use crate::prompts::{render_classify_system_prompt, render_classify_user_prompt};
use crate::types::{ClassifiedIngredients, WorkflowState};

/// Build a classification from the model's extracted JSON.
///
/// Missing or ill-typed categories are empty. `main_ingredients` is always the
/// caller's list, never model output.
pub fn classification_from_map(
    main_ingredients: Vec<String>,
    map: &JsonMap,
) -> ClassifiedIngredients {
    ClassifiedIngredients {
        main_ingredients,
        proteins: string_list_field(map, "proteins"),
        vegetables: string_list_field(map, "vegetables"),
        grains: string_list_field(map, "grains"),
        seasonings: string_list_field(map, "seasonings"),
        missing_essentials: string_list_field(map, "missing_essentials"),
    }
}

/// Run the classifier and store its result on the state.
///
/// Never fails: a provider error or unusable output leaves every category
/// empty.
pub async fn classify_ingredients(
    provider: &dyn LlmProvider,
    state: WorkflowState,
) -> WorkflowState {
    let stage = Stage::Classify;

    async move {
        let start = Instant::now();
        let request = &state.request;

        let system = render_classify_system_prompt();
        let user =
            render_classify_user_prompt(request.ingredients(), request.dietary_restrictions());

        let outcome: Result<JsonMap, Degrade> = match provider.complete(&system, &user).await {
            Ok(text) => try_extract_json(&text).map_err(Degrade::from),
            Err(e) => Err(Degrade::from(e)),
        };

        let main_ingredients = request.ingredients().to_vec();
        let classified = match outcome {
            Ok(map) => classification_from_map(main_ingredients, &map),
            Err(reason) => {
                tracing::warn!(
                    prompt = CLASSIFY_PROMPT_NAME,
                    reason = %reason,
                    "Classification degraded to empty categories"
                );
                ClassifiedIngredients::unclassified(main_ingredients)
            }
        };

        tracing::info!(
            duration_ms = start.elapsed().as_millis() as u64,
            missing_essentials = classified.missing_essentials.len(),
            "Stage completed"
        );

        state.with_classified(classified)
    }
    .instrument(info_span!("pipeline_stage", stage = %stage))
    .await
}
