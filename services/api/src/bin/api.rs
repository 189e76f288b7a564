//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FileCatalogSource, OpenAiCompletionAdapter},
    config::Config,
    error::ApiError,
    web::{router, ApiDoc, AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method};
use axum::Router;
use course_studio_core::ports::CatalogSource;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Catalog ---
    let load = FileCatalogSource::new(&config.data_dir).load();
    info!(
        "Catalog ready: {} courses, {} modules, {} exercise categories ({} warnings)",
        load.catalog.courses.len(),
        load.catalog.modules.len(),
        load.catalog.exercises.len(),
        load.warnings.len()
    );

    // --- 3. Initialize the Completion Adapter ---
    let mut openai_config = OpenAIConfig::new().with_api_key(&config.llm_api_key);
    if let Some(api_base) = &config.llm_api_base {
        info!("Using completion endpoint {}", api_base);
        openai_config = openai_config.with_api_base(api_base);
    }
    let completion_adapter = Arc::new(OpenAiCompletionAdapter::new(
        Client::with_config(openai_config),
        config.completion_model.clone(),
        config.completion_temperature,
        config.completion_max_tokens,
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(
        completion_adapter,
        load,
        config.history_max_turns,
    )?);

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let app = Router::new()
        .merge(router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
