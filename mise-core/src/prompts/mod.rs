//! Prompt templates for the model-calling pipeline stages and the one-shot
//! suggestion.

pub mod classify;
pub mod compose;
pub mod concept;
pub mod suggest;

pub use classify::{render_classify_system_prompt, render_classify_user_prompt};
pub use compose::{render_compose_system_prompt, render_compose_user_prompt};
pub use concept::{render_concept_system_prompt, render_concept_user_prompt};
pub use suggest::{render_suggest_system_prompt, render_suggest_user_prompt};

use serde_json::{Map, Value};

/// Render preferences as `key: value` pairs. String values are written
/// without JSON quotes.
pub(crate) fn format_preferences(preferences: &Map<String, Value>) -> String {
    preferences
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}: {}", key, s),
            other => format!("{}: {}", key, other),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_preferences() {
        let prefs = json!({"cuisine": "Italian", "servings": 4, "spicy": false});
        let Value::Object(map) = prefs else {
            unreachable!()
        };
        assert_eq!(
            format_preferences(&map),
            "cuisine: Italian, servings: 4, spicy: false"
        );
    }
}
