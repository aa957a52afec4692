//! Full recipe prompt.

use crate::types::RecipeConcept;

/// Prompt name used in logs.
pub const COMPOSE_PROMPT_NAME: &str = "compose_recipe";

/// Render the system prompt for writing the full recipe.
pub fn render_compose_system_prompt() -> String {
    r#"You are a professional chef writing detailed recipes.
Write a complete recipe with an ingredients list, measurements, and step-by-step instructions.
The recipe should be practical, detailed, and easy to follow.
Format the recipe clearly with sections for Ingredients, Instructions, and Cooking Tips."#
        .to_string()
}

/// Render the user message describing the dish to write up.
pub fn render_compose_user_prompt(
    concept: &RecipeConcept,
    ingredients: &[String],
    missing_essentials: &[String],
    dietary_restrictions: &[String],
    query: Option<&str>,
) -> String {
    let mut prompt = format!(
        "Recipe: {}\nCuisine: {}\nDifficulty: {}\nAvailable ingredients: {}\n",
        concept.name,
        concept.cuisine_type,
        concept.difficulty,
        ingredients.join(", ")
    );

    if !missing_essentials.is_empty() {
        prompt.push_str(&format!(
            "Assumed kitchen staples: {}\n",
            missing_essentials.join(", ")
        ));
    }

    if !dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "Dietary restrictions: {}\n",
            dietary_restrictions.join(", ")
        ));
    }

    if let Some(query) = query {
        prompt.push_str(&format!("Additional requirements: {}\n", query));
    }

    prompt.push_str("\nPlease create a complete recipe with measurements and detailed instructions.");
    prompt
}
