//! Concept stage - picks the dish to cook.

use std::time::Instant;

use tracing::{info_span, Instrument};

use super::classify::classify_ingredients;
use crate::extract::{bool_field, string_field, try_extract_json, JsonMap};
use crate::llm::LlmProvider;
use crate::pipeline::{Degrade, Stage};
use crate::prompts::concept::CONCEPT_PROMPT_NAME;
use crate::prompts::{render_concept_system_prompt, render_concept_user_prompt};
use crate::types::{ClassifiedIngredients, RecipeConcept, WorkflowState};

/// Build a concept from the model's extracted JSON, defaulting each missing
/// or ill-typed field on its own.
pub fn concept_from_map(map: &JsonMap) -> RecipeConcept {
    let defaults = RecipeConcept::default();
    RecipeConcept {
        name: string_field(map, "name").unwrap_or(defaults.name),
        cuisine_type: string_field(map, "cuisine_type").unwrap_or(defaults.cuisine_type),
        difficulty: string_field(map, "difficulty").unwrap_or(defaults.difficulty),
        cooking_time: string_field(map, "cooking_time").unwrap_or(defaults.cooking_time),
        suitable_for_restrictions: bool_field(map, "suitable_for_restrictions")
            .unwrap_or(defaults.suitable_for_restrictions),
    }
}

/// Generate a recipe concept, classifying the ingredients first if needed.
///
/// Never fails: a provider error or unusable output yields
/// [`RecipeConcept::default`].
pub async fn generate_concept(provider: &dyn LlmProvider, state: WorkflowState) -> WorkflowState {
    let state = if state.classified.is_some() {
        state
    } else {
        classify_ingredients(provider, state).await
    };

    let stage = Stage::Concept;

    async move {
        let start = Instant::now();
        let request = &state.request;
        let empty = ClassifiedIngredients::default();
        let classified = state.classified.as_ref().unwrap_or(&empty);

        let system = render_concept_system_prompt();
        let user = render_concept_user_prompt(
            request.ingredients(),
            classified,
            request.dietary_restrictions(),
            request.preferences(),
        );

        let outcome: Result<JsonMap, Degrade> = match provider.complete(&system, &user).await {
            Ok(text) => try_extract_json(&text).map_err(Degrade::from),
            Err(e) => Err(Degrade::from(e)),
        };

        let concept = match outcome {
            Ok(map) => concept_from_map(&map),
            Err(reason) => {
                tracing::warn!(
                    prompt = CONCEPT_PROMPT_NAME,
                    reason = %reason,
                    "Concept degraded to defaults"
                );
                RecipeConcept::default()
            }
        };

        tracing::info!(
            duration_ms = start.elapsed().as_millis() as u64,
            recipe_name = %concept.name,
            "Stage completed"
        );

        state.with_concept(concept)
    }
    .instrument(info_span!("pipeline_stage", stage = %stage))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_json;
    use crate::llm::FakeProvider;
    use crate::types::RecipeRequest;

    fn classified_state() -> WorkflowState {
        let request = RecipeRequest::from_ingredients(["salmon", "asparagus"]).unwrap();
        let classified = ClassifiedIngredients {
            main_ingredients: request.ingredients().to_vec(),
            proteins: vec!["salmon".to_string()],
            vegetables: vec!["asparagus".to_string()],
            ..Default::default()
        };
        WorkflowState::new(request).with_classified(classified)
    }

    #[test]
    fn test_fields_default_individually() {
        let map = extract_json(r#"{"name": "Seared Salmon", "difficulty": 3}"#);
        let concept = concept_from_map(&map);

        assert_eq!(concept.name, "Seared Salmon");
        assert_eq!(concept.cuisine_type, "Fusion");
        assert_eq!(concept.difficulty, "medium");
        assert_eq!(concept.cooking_time, "30 minutes");
        assert!(concept.suitable_for_restrictions);
    }

    #[test]
    fn test_open_difficulty_vocabulary() {
        let map = extract_json(r#"{"difficulty": "beginner-friendly", "suitable_for_restrictions": false}"#);
        let concept = concept_from_map(&map);

        assert_eq!(concept.difficulty, "beginner-friendly");
        assert!(!concept.suitable_for_restrictions);
    }

    #[test]
    fn test_concept_is_deterministic() {
        let map = extract_json(r#"{"name": "Hash", "cooking_time": "20 minutes"}"#);
        assert_eq!(concept_from_map(&map), concept_from_map(&map));
    }

    #[tokio::test]
    async fn test_concept_from_model() {
        let provider = FakeProvider::with_response(
            "recipe concept",
            r#"{"name": "Salmon Traybake", "cuisine_type": "Nordic", "difficulty": "easy", "cooking_time": "25 minutes", "suitable_for_restrictions": true}"#,
        );

        let state = generate_concept(&provider, classified_state()).await;
        let concept = state.concept.unwrap();

        assert_eq!(concept.name, "Salmon Traybake");
        assert_eq!(concept.cuisine_type, "Nordic");

        let calls = provider.calls();
        assert_eq!(calls.len(), 1, "classification already present");
        assert!(calls[0].user.contains("Proteins: salmon"));
        assert!(calls[0].user.contains("Vegetables: asparagus"));
    }

    #[tokio::test]
    async fn test_concept_degrades_on_provider_error() {
        let provider = FakeProvider::new().fail_on("recipe concept");

        let state = generate_concept(&provider, classified_state()).await;

        assert_eq!(state.concept, Some(RecipeConcept::default()));
    }

    #[tokio::test]
    async fn test_concept_classifies_first_when_needed() {
        let provider = FakeProvider::default();
        let request = RecipeRequest::from_ingredients(["beans"]).unwrap();

        let state = generate_concept(&provider, WorkflowState::new(request)).await;

        assert!(state.classified.is_some());
        assert!(state.concept.is_some());

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].system.contains("Categorize"));
        assert!(calls[1].system.contains("recipe concept"));
    }
}
