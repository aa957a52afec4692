use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RequestError;

/// What the caller has on hand and what they want.
///
/// Built through [`RecipeRequest::new`], which validates the ingredient list;
/// fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeRequest {
    ingredients: Vec<String>,
    dietary_restrictions: Vec<String>,
    preferences: Map<String, Value>,
    query: Option<String>,
}

impl RecipeRequest {
    /// Validate and build a request.
    ///
    /// Ingredient names must not be blank and are kept exactly as given.
    /// Dietary restrictions behave as a set: blanks and repeats are dropped,
    /// first occurrence order is kept. A blank query counts as no query.
    pub fn new(
        ingredients: Vec<String>,
        dietary_restrictions: Vec<String>,
        preferences: Map<String, Value>,
        query: Option<String>,
    ) -> Result<Self, RequestError> {
        if ingredients.is_empty() {
            return Err(RequestError::EmptyIngredients);
        }

        if let Some(index) = ingredients.iter().position(|name| name.trim().is_empty()) {
            return Err(RequestError::BlankIngredient(index));
        }

        let mut restrictions: Vec<String> = Vec::new();
        for restriction in dietary_restrictions {
            let trimmed = restriction.trim();
            if !trimmed.is_empty() && !restrictions.iter().any(|r| r == trimmed) {
                restrictions.push(trimmed.to_string());
            }
        }

        let query = query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        Ok(Self {
            ingredients,
            dietary_restrictions: restrictions,
            preferences,
            query,
        })
    }

    /// Shorthand for a request with ingredients only.
    pub fn from_ingredients<I, S>(ingredients: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            ingredients.into_iter().map(Into::into).collect(),
            Vec::new(),
            Map::new(),
            None,
        )
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn dietary_restrictions(&self) -> &[String] {
        &self.dietary_restrictions
    }

    pub fn preferences(&self) -> &Map<String, Value> {
        &self.preferences
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// Ingredients sorted into food groups by the classifier stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedIngredients {
    /// Always the request's ingredient list, never model output.
    pub main_ingredients: Vec<String>,
    pub proteins: Vec<String>,
    pub vegetables: Vec<String>,
    pub grains: Vec<String>,
    pub seasonings: Vec<String>,
    /// Staples the recipe will probably assume (salt, pepper, ...).
    pub missing_essentials: Vec<String>,
}

impl ClassifiedIngredients {
    /// Classification with every category empty.
    pub fn unclassified(main_ingredients: Vec<String>) -> Self {
        Self {
            main_ingredients,
            ..Self::default()
        }
    }
}

/// The recipe idea produced by the concept stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeConcept {
    pub name: String,
    pub cuisine_type: String,
    /// Usually "easy", "medium" or "hard", but any string is accepted.
    pub difficulty: String,
    pub cooking_time: String,
    pub suitable_for_restrictions: bool,
}

impl Default for RecipeConcept {
    fn default() -> Self {
        Self {
            name: "Custom Recipe".to_string(),
            cuisine_type: "Fusion".to_string(),
            difficulty: "medium".to_string(),
            cooking_time: "30 minutes".to_string(),
            suitable_for_restrictions: true,
        }
    }
}

/// Accumulator threaded through the pipeline stages of one run.
///
/// Each stage consumes the state and hands back a new one with its own
/// field filled in; nothing is shared between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub request: RecipeRequest,
    pub classified: Option<ClassifiedIngredients>,
    pub concept: Option<RecipeConcept>,
    pub recipe_text: Option<String>,
}

impl WorkflowState {
    pub fn new(request: RecipeRequest) -> Self {
        Self {
            request,
            classified: None,
            concept: None,
            recipe_text: None,
        }
    }

    pub fn with_classified(self, classified: ClassifiedIngredients) -> Self {
        Self {
            classified: Some(classified),
            ..self
        }
    }

    pub fn with_concept(self, concept: RecipeConcept) -> Self {
        Self {
            concept: Some(concept),
            ..self
        }
    }

    pub fn with_recipe_text(self, recipe_text: String) -> Self {
        Self {
            recipe_text: Some(recipe_text),
            ..self
        }
    }
}

/// Final result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipe_name: String,
    pub ingredients_used: Vec<String>,
    pub recipe_content: String,
    pub cooking_time: String,
    pub difficulty: String,
    pub missing_ingredients: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_requires_ingredients() {
        let err = RecipeRequest::from_ingredients(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, RequestError::EmptyIngredients);
    }

    #[test]
    fn test_request_rejects_blank_ingredient() {
        let err = RecipeRequest::from_ingredients(["rice", "  "]).unwrap_err();
        assert_eq!(err, RequestError::BlankIngredient(1));
    }

    #[test]
    fn test_request_keeps_ingredients_verbatim() {
        let request = RecipeRequest::from_ingredients([" onion", "rice\n", "chicken"]).unwrap();
        assert_eq!(request.ingredients(), [" onion", "rice\n", "chicken"]);
    }

    #[test]
    fn test_restrictions_deduplicated() {
        let request = RecipeRequest::new(
            vec!["tofu".to_string()],
            vec![
                "vegan".to_string(),
                "gluten-free".to_string(),
                "vegan".to_string(),
                " ".to_string(),
            ],
            Map::new(),
            Some("   ".to_string()),
        )
        .unwrap();
        assert_eq!(request.dietary_restrictions(), ["vegan", "gluten-free"]);
        assert_eq!(request.query(), None);
    }

    #[test]
    fn test_concept_defaults() {
        let concept = RecipeConcept::default();
        assert_eq!(
            serde_json::to_value(concept).unwrap(),
            json!({
                "name": "Custom Recipe",
                "cuisine_type": "Fusion",
                "difficulty": "medium",
                "cooking_time": "30 minutes",
                "suitable_for_restrictions": true
            })
        );
    }

    #[test]
    fn test_state_functional_updates() {
        let request = RecipeRequest::from_ingredients(["egg"]).unwrap();
        let state = WorkflowState::new(request)
            .with_concept(RecipeConcept::default())
            .with_recipe_text("Boil the egg.".to_string());

        assert!(state.classified.is_none());
        assert_eq!(state.concept, Some(RecipeConcept::default()));
        assert_eq!(state.recipe_text.as_deref(), Some("Boil the egg."));
    }
}
