//! Recipe concept prompt.

use serde_json::{Map, Value};

use super::format_preferences;
use crate::types::ClassifiedIngredients;

/// Prompt name used in logs.
pub const CONCEPT_PROMPT_NAME: &str = "generate_concept";

/// Render the system prompt for concept generation.
pub fn render_concept_system_prompt() -> String {
    r#"You are a creative chef who specializes in turning available ingredients into a recipe concept.
Based on the ingredients provided, suggest one suitable recipe concept.
Consider dietary restrictions and preferences if provided.

Respond with JSON only, no other text:
{"name": "string", "cuisine_type": "string", "difficulty": "easy | medium | hard", "cooking_time": "string, e.g. 30 minutes", "suitable_for_restrictions": true}"#
        .to_string()
}

/// Render the user message with ingredients grouped by food group.
pub fn render_concept_user_prompt(
    ingredients: &[String],
    classified: &ClassifiedIngredients,
    dietary_restrictions: &[String],
    preferences: &Map<String, Value>,
) -> String {
    let mut prompt = format!("Available ingredients: {}\n", ingredients.join(", "));

    let groups = [
        ("Proteins", &classified.proteins),
        ("Vegetables", &classified.vegetables),
        ("Grains/Starches", &classified.grains),
    ];
    for (label, items) in groups {
        if !items.is_empty() {
            prompt.push_str(&format!("{}: {}\n", label, items.join(", ")));
        }
    }

    if !dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "Dietary restrictions: {}\n",
            dietary_restrictions.join(", ")
        ));
    }

    if !preferences.is_empty() {
        prompt.push_str(&format!("Preferences: {}\n", format_preferences(preferences)));
    }

    prompt.push_str("\nSuggest a creative recipe idea that uses these ingredients efficiently.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_non_empty_groups_listed() {
        let classified = ClassifiedIngredients {
            proteins: vec!["tofu".to_string()],
            grains: vec!["rice".to_string()],
            ..Default::default()
        };
        let prompt = render_concept_user_prompt(
            &["tofu".to_string(), "rice".to_string()],
            &classified,
            &[],
            &Map::new(),
        );

        assert!(prompt.starts_with("Available ingredients: tofu, rice\n"));
        assert!(prompt.contains("Proteins: tofu\n"));
        assert!(prompt.contains("Grains/Starches: rice\n"));
        assert!(!prompt.contains("Vegetables:"));
        assert!(!prompt.contains("Dietary restrictions"));
        assert!(!prompt.contains("Preferences"));
    }

    #[test]
    fn test_restrictions_and_preferences() {
        let Value::Object(preferences) = json!({"cuisine": "Thai"}) else {
            unreachable!()
        };
        let prompt = render_concept_user_prompt(
            &["noodles".to_string()],
            &ClassifiedIngredients::default(),
            &["vegan".to_string()],
            &preferences,
        );

        assert!(prompt.contains("Dietary restrictions: vegan\n"));
        assert!(prompt.contains("Preferences: cuisine: Thai\n"));
    }

    #[test]
    fn test_system_prompt_asks_for_concept_fields() {
        let prompt = render_concept_system_prompt();
        assert!(prompt.contains("recipe concept"));
        assert!(prompt.contains("suitable_for_restrictions"));
    }
}
