//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests and offline runs to work without network access or API costs.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::{Mutex, RwLock};

/// A single recorded call to the fake provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
}

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the system instruction or user message
/// contains a registered substring (case-insensitive, first registered wins).
/// Failure patterns are checked before responses. If nothing matches, the
/// default response is returned, or an error when there is none.
#[derive(Debug)]
pub struct FakeProvider {
    /// Prompt substring -> response, in registration order
    responses: RwLock<Vec<(String, String)>>,
    /// Prompt substrings that make the call fail
    failures: RwLock<Vec<String>>,
    /// Default response if no match found
    default_response: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
            failures: RwLock::new(Vec::new()),
            default_response: Some("{}".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses and no default.
    pub fn new() -> Self {
        Self {
            default_response: None,
            ..Self::default()
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        Self::new().respond_to(prompt_contains, response)
    }

    /// Builder form of [`FakeProvider::add_response`].
    pub fn respond_to(self, prompt_contains: &str, response: &str) -> Self {
        self.add_response(prompt_contains, response);
        self
    }

    /// Builder form of [`FakeProvider::add_failure`].
    pub fn fail_on(self, prompt_contains: &str) -> Self {
        self.add_failure(prompt_contains);
        self
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .push((prompt_contains.to_lowercase(), response.to_string()));
    }

    /// Make calls whose prompt contains the substring fail with `RequestFailed`.
    pub fn add_failure(&self, prompt_contains: &str) {
        self.failures
            .write()
            .unwrap()
            .push(prompt_contains.to_lowercase());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Create a FakeProvider answering every stage of the recipe pipeline and
    /// the one-shot suggestion.
    pub fn with_recipe_responses() -> Self {
        Self::new()
            .respond_to(
                "categorize",
                r#"```json
{
  "proteins": ["chicken breast"],
  "vegetables": ["broccoli", "lemon"],
  "grains": ["potatoes"],
  "seasonings": ["garlic", "olive oil"],
  "missing_essentials": ["salt", "black pepper"]
}
```"#,
            )
            .respond_to(
                "recipe concept",
                r#"Here is an idea:
```json
{"name": "Lemon Garlic Chicken Traybake", "cuisine_type": "Mediterranean", "difficulty": "easy", "cooking_time": "45 minutes", "suitable_for_restrictions": true}
```"#,
            )
            .respond_to(
                "complete recipe",
                "## Ingredients\n- 2 chicken breasts\n- 500g potatoes\n\n## Instructions\n1. Roast everything at 200C for 40 minutes.\n\n## Cooking Tips\n- Rest the chicken before slicing.",
            )
            .respond_to(
                "cooking assistant",
                "Chicken Fried Rice\n\nIngredients:\n- 1 chicken breast, diced\n- 2 cups cooked rice\n\nInstructions:\n1. Brown the chicken.\n2. Add the rice and fry for 5 minutes.",
            )
    }

    /// All calls made so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
        });

        let prompt_lower = format!("{}\n{}", system, user).to_lowercase();

        let failures = self.failures.read().unwrap();
        if let Some(pattern) = failures.iter().find(|p| prompt_lower.contains(p.as_str())) {
            return Err(LlmError::RequestFailed(format!(
                "FakeProvider: simulated failure for '{}'",
                pattern
            )));
        }

        let responses = self.responses.read().unwrap();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(pattern.as_str()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                user.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
