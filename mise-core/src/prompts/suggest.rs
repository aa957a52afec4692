//! One-shot recipe suggestion prompt.

use serde_json::{Map, Value};

use super::format_preferences;

/// Prompt name used in logs.
pub const SUGGEST_PROMPT_NAME: &str = "suggest_recipe";

/// Render the system prompt for a single-call suggestion.
pub fn render_suggest_system_prompt() -> String {
    r#"You are a helpful cooking assistant that suggests meals based on available ingredients.

Your task is to:
1. Look at the ingredients provided
2. Suggest one suitable meal that can be made with them
3. Give a clear recipe with ingredients, measurements, and step-by-step instructions
4. Respect any dietary restrictions or preferences mentioned
5. If something critical is missing, suggest simple substitutions or additions

When making suggestions:
- Be creative but practical
- Use as many of the available ingredients as possible
- Include estimated preparation and cooking time
- Format the answer with sections for ingredients, instructions, and tips

Keep the answer concise and easy to follow."#
        .to_string()
}

/// Render the user message: ingredients, then restrictions and preferences
/// when present, then the question.
pub fn render_suggest_user_prompt(
    ingredients: &[String],
    dietary_restrictions: &[String],
    preferences: &Map<String, Value>,
) -> String {
    let mut prompt = format!("I have these ingredients: {}. ", ingredients.join(", "));

    if !dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "Dietary restrictions: {}. ",
            dietary_restrictions.join(", ")
        ));
    }

    if !preferences.is_empty() {
        prompt.push_str(&format!("Preferences: {}. ", format_preferences(preferences)));
    }

    prompt.push_str("What meal can I cook with these ingredients?");
    prompt
}
