//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use muxkit_core::Config;
use muxkit_vendor::MuxClient;
use std::sync::Arc;

/// Initialize the entire application: validation, tracing, vendor client, routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration, before anything listens
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment(), config.is_production())?;

    tracing::info!(
        environment = %config.environment(),
        vendor_url = %config.mux().api_url,
        token_id = %config.mux().token_id_preview(),
        "Configuration loaded and validated successfully"
    );

    let vendor = MuxClient::new(config.mux()).context("Failed to create vendor client")?;
    let state = Arc::new(AppState::new(config.clone(), Arc::new(vendor)));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
