mod api;
mod telemetry;
mod types;

use anyhow::Context;
use axum::Router;
use mise_core::{ClaudeProvider, LlmProvider, Workflow};
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub type AppState = Arc<Workflow>;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Assemble routes, docs and middleware around a workflow.
pub fn build_app(workflow: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::router())
        .merge(swagger_ui)
        .with_state(workflow)
        .layer(telemetry::trace_layer())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json()?;
        println!("{}", spec);
        return Ok(());
    }

    telemetry::init_telemetry();

    // Fail at startup rather than on the first request
    let provider = ClaudeProvider::from_env().context("Model gateway is not configured")?;
    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        "Model gateway ready"
    );

    let workflow: AppState = Arc::new(Workflow::new(Arc::new(provider)));
    let app = build_app(workflow);

    let bind_addr = env::var("MISE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!("Swagger UI available at /swagger-ui/");

    axum::serve(listener, app).await?;

    Ok(())
}
