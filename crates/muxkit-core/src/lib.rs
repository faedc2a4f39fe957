//! muxkit core library
//!
//! Domain models for the vendor's upload and asset records, the uniform proxy
//! response envelope, error types, and environment configuration shared by the
//! proxy server, its client, and the widgets.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, MuxConfig, ProxyConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    ApiEnvelope, Asset, AssetStatus, CreateUploadRequest, NewAssetSettings, PlaybackId, Upload,
    UploadStatus, MP4_SUPPORT_NONE, PUBLIC_PLAYBACK_POLICY,
};
