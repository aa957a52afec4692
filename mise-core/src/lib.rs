//! Recipe generation from whatever is in the kitchen.
//!
//! A request (ingredients, dietary restrictions, preferences, free-text
//! query) flows through a fixed four-stage pipeline that makes three
//! sequential model calls: classify the ingredients, pick a recipe concept,
//! write the recipe. See [`pipeline`] for the stage contracts;
//! [`suggest_recipe`] is the single-call alternative.

pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod suggest;
pub mod types;

pub use config::{ConfigError, LlmConfig};
pub use error::{PipelineError, RequestError};
pub use extract::{extract_json, try_extract_json, ExtractionDegrade, JsonMap};
pub use llm::{
    create_provider_from_env, ClaudeProvider, FakeProvider, LlmError, LlmProvider,
};
pub use pipeline::{Stage, Workflow};
pub use suggest::suggest_recipe;
pub use types::{
    ClassifiedIngredients, RecipeConcept, RecipeRequest, RecipeResponse, WorkflowState,
};
