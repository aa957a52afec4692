use mise_core::{RecipeRequest, RecipeResponse, RequestError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Body of `POST /api/recipe`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeRequestBody {
    /// Available ingredients, in the order they should be reported back.
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub preferences: Option<Map<String, Value>>,
    /// Additional instructions or requirements for the recipe.
    #[serde(default)]
    pub query: Option<String>,
}

impl RecipeRequestBody {
    /// Validate into a pipeline request. `null` lists and maps count as empty.
    pub fn into_request(self) -> Result<RecipeRequest, RequestError> {
        RecipeRequest::new(
            self.ingredients,
            self.dietary_restrictions.unwrap_or_default(),
            self.preferences.unwrap_or_default(),
            self.query,
        )
    }
}

/// Generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponseBody {
    pub recipe_name: String,
    pub ingredients_used: Vec<String>,
    /// The full recipe with instructions.
    pub recipe_content: String,
    pub cooking_time: String,
    pub difficulty: String,
    /// Staples the recipe assumes but that were not in the input.
    pub missing_ingredients: Vec<String>,
}

impl From<RecipeResponse> for RecipeResponseBody {
    fn from(response: RecipeResponse) -> Self {
        Self {
            recipe_name: response.recipe_name,
            ingredients_used: response.ingredients_used,
            recipe_content: response.recipe_content,
            cooking_time: response.cooking_time,
            difficulty: response.difficulty,
            missing_ingredients: response.missing_ingredients,
        }
    }
}
