use axum::{response::IntoResponse, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::{OpenApi, ToSchema};

pub const SERVICE_NAME: &str = "Mise Recipe API";
pub const SERVICE_DESCRIPTION: &str = "Generate recipe suggestions based on available ingredients";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Path -> what it does
    pub endpoints: BTreeMap<String, String>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Service metadata and the available endpoints
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service metadata", body = ServiceInfo)
    )
)]
pub async fn root() -> impl IntoResponse {
    let endpoints = [
        ("/api/recipe", "Generate recipe suggestions"),
        ("/health", "Health check endpoint"),
        ("/swagger-ui", "API documentation (Swagger UI)"),
        ("/api-docs/openapi.json", "OpenAPI specification"),
    ]
    .into_iter()
    .map(|(path, description)| (path.to_string(), description.to_string()))
    .collect();

    Json(ServiceInfo {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
        endpoints,
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(health_check, root),
    components(schemas(HealthResponse, ServiceInfo))
)]
pub struct ApiDoc;
