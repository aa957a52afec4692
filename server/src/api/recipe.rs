use crate::api::ErrorResponse;
use crate::types::{RecipeRequestBody, RecipeResponseBody};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use utoipa::OpenApi;

/// Generate a recipe from available ingredients
///
/// Runs the full pipeline: ingredient classification, recipe concept, full
/// recipe text. Stateless; nothing is stored.
#[utoipa::path(
    post,
    path = "/api/recipe",
    tag = "recipe",
    request_body = RecipeRequestBody,
    responses(
        (status = 200, description = "Generated recipe", body = RecipeResponseBody),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Recipe generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(workflow): State<AppState>,
    Json(body): Json<RecipeRequestBody>,
) -> impl IntoResponse {
    let request = match body.into_request() {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Rejected recipe request: {}", e);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    detail: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    match workflow.run(request).await {
        Ok(response) => (StatusCode::OK, Json(RecipeResponseBody::from(response))).into_response(),
        Err(e) => {
            tracing::error!(stage = %e.stage(), "Recipe generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: format!("Error generating recipe: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(generate_recipe),
    components(schemas(RecipeRequestBody, RecipeResponseBody))
)]
pub struct ApiDoc;
