//! Vendor abstraction trait
//!
//! The proxy only ever talks to the vendor through `VideoVendor`, so routes can
//! be exercised against an in-memory implementation. Records come back exactly
//! as the vendor sent them; typed views (`Upload`, `Asset`) belong to clients.

use async_trait::async_trait;
use muxkit_core::{AppError, CreateUploadRequest};
use serde_json::Value;
use thiserror::Error;

/// One vendor record (upload or asset), untouched.
pub type VendorRecord = Value;

/// String field of a record, for logging. Empty when absent.
pub fn record_str<'a>(record: &'a VendorRecord, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Vendor call errors
#[derive(Debug, Error)]
pub enum VendorError {
    /// The vendor answered with an error status. `message` is the vendor's own text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Vendor request failed: {0}")]
    Transport(String),

    #[error("Unexpected vendor response: {0}")]
    Decode(String),

    #[error("Vendor client configuration error: {0}")]
    Config(String),
}

impl VendorError {
    /// HTTP status the vendor answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            VendorError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for vendor operations
pub type VendorResult<T> = Result<T, VendorError>;

impl From<VendorError> for AppError {
    fn from(err: VendorError) -> Self {
        match err {
            VendorError::Config(msg) => AppError::Config(msg),
            other => AppError::Vendor(other.to_string()),
        }
    }
}

/// Video hosting vendor operations used by the proxy.
#[async_trait]
pub trait VideoVendor: Send + Sync {
    /// Create a direct upload and return the record holding its PUT URL.
    async fn create_upload(&self, request: &CreateUploadRequest) -> VendorResult<VendorRecord>;

    /// Fetch an upload; `asset_id` is set once processing has started.
    async fn retrieve_upload(&self, upload_id: &str) -> VendorResult<VendorRecord>;

    /// Fetch an asset with its status and playback identifiers.
    async fn retrieve_asset(&self, asset_id: &str) -> VendorResult<VendorRecord>;

    /// List assets, at most `limit` of them.
    async fn list_assets(&self, limit: u32) -> VendorResult<Vec<VendorRecord>>;

    /// Delete an asset permanently.
    async fn delete_asset(&self, asset_id: &str) -> VendorResult<()>;
}
