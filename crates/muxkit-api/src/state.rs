//! Application state shared by every handler.
//!
//! The proxy keeps nothing between requests; state is only the loaded config
//! and the vendor client.

use muxkit_core::Config;
use muxkit_vendor::VideoVendor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub vendor: Arc<dyn VideoVendor>,
}

impl AppState {
    pub fn new(config: Config, vendor: Arc<dyn VideoVendor>) -> Self {
        Self { config, vendor }
    }

    /// Page size used for `/api/videos`
    pub fn list_limit(&self) -> u32 {
        self.config.mux().list_limit
    }

    /// `cors_origin` attached to newly created uploads
    pub fn upload_cors_origin(&self) -> &str {
        &self.config.mux().upload_cors_origin
    }
}
