//! Ingredient classification prompt.

/// Prompt name used in logs.
pub const CLASSIFY_PROMPT_NAME: &str = "classify_ingredients";

/// Render the system prompt for ingredient classification.
pub fn render_classify_system_prompt() -> String {
    r#"You are an expert chef analyzing a list of ingredients.
Categorize these ingredients into:
1. Proteins (meat, fish, tofu, legumes, etc.)
2. Vegetables and fruits
3. Grains and starches (rice, pasta, potatoes, etc.)
4. Seasonings (herbs, spices, oils, etc.)

Also identify common essentials that are missing from the list but are typically assumed to be in a kitchen (salt, pepper, common spices).

Respond with JSON only, no other text:
{"proteins": ["..."], "vegetables": ["..."], "grains": ["..."], "seasonings": ["..."], "missing_essentials": ["..."]}"#
        .to_string()
}

/// Render the user message listing the ingredients and restrictions.
pub fn render_classify_user_prompt(ingredients: &[String], dietary_restrictions: &[String]) -> String {
    let mut prompt = format!("Here are my ingredients: {}", ingredients.join(", "));
    if !dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "\nI have these dietary restrictions: {}",
            dietary_restrictions.join(", ")
        ));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_system_prompt() {
        let prompt = render_classify_system_prompt();
        assert!(prompt.contains("Categorize"));
        assert!(prompt.contains("missing_essentials"));
    }

    #[test]
    fn test_render_user_prompt() {
        let ingredients = vec!["chicken".to_string(), "rice".to_string()];
        let prompt = render_classify_user_prompt(&ingredients, &[]);
        assert_eq!(prompt, "Here are my ingredients: chicken, rice");

        let prompt = render_classify_user_prompt(&ingredients, &["halal".to_string()]);
        assert!(prompt.ends_with("\nI have these dietary restrictions: halal"));
    }
}
