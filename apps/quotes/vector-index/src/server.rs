//! Server initialization and lifecycle management
//!
//! - Tracing initialization
//! - Index creation from configuration
//! - Router assembly (API, docs, health, readiness)
//! - HTTP server startup with graceful shutdown

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_vector_index::{VectorIndexService, handlers};
use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::openapi::ApiDoc;

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub dimension: usize,
    pub entries: usize,
}

/// The index lives in process memory, so it is ready as soon as it exists.
async fn readiness(State(service): State<VectorIndexService>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        status: "ready",
        dimension: service.dimension(),
        entries: service.count().await,
    })
}

/// Full application router for `service`.
pub fn build_router(config: &Config, service: VectorIndexService) -> Result<Router> {
    let api_routes = handlers::router(service.clone());
    let router = create_router::<ApiDoc>(api_routes, &config.environment)
        .wrap_err("Failed to build router")?;

    Ok(router
        .merge(health_router(config.app))
        .merge(
            Router::new()
                .route("/ready", get(readiness))
                .with_state(service),
        ))
}

/// Run the HTTP server until SIGINT/SIGTERM.
pub async fn run() -> Result<()> {
    install_color_eyre();

    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    init_tracing(&config.environment);

    let service = VectorIndexService::new(config.index);
    let app = build_router(&config, service.clone())?;

    info!(
        name = config.app.name,
        version = config.app.version,
        address = %config.server.address(),
        "Starting vector index server"
    );

    create_production_app(app, &config.server, config.shutdown_timeout, async move {
        let entries = service.count().await;
        info!(entries, "Discarding in-memory index");
    })
    .await
    .wrap_err("Server error")?;

    info!("Vector index server shutdown complete");
    Ok(())
}
