//! Configuration validation
//!
//! Startup checks beyond what `Config` enforces while loading.

use anyhow::Result;
use muxkit_core::Config;

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.cors_origins().is_empty() {
        return Err(anyhow::anyhow!(
            "CORS_ORIGINS is empty. Use '*' or a comma-separated list of origins."
        ));
    }

    // Browsers PUT straight to the vendor, so this origin matters as much as CORS_ORIGINS
    if is_production && config.mux().upload_cors_origin == "*" {
        tracing::warn!(
            "MUX_UPLOAD_CORS_ORIGIN is '*' in production - any site can use issued upload URLs"
        );
    }

    if !config.mux().api_url.starts_with("https://") {
        tracing::warn!(
            api_url = %config.mux().api_url,
            "Vendor API URL is not https - credentials are sent in clear text"
        );
    }

    tracing::debug!("Configuration validation passed");
    Ok(())
}
