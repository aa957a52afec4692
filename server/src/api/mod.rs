pub mod health;
pub mod recipe;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Returns the router for every API endpoint
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api/recipe", post(recipe::generate_recipe))
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Mise Recipe API", description = "Generate recipe suggestions based on available ingredients"),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> =
        vec![health::ApiDoc::openapi(), recipe::ApiDoc::openapi()];

    for module_spec in modules {
        spec.merge(module_spec);
    }

    spec
}
