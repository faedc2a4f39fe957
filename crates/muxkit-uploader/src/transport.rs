//! The calls the orchestrator makes, behind a trait so tests can script them.

use crate::file::SelectedFile;
use anyhow::Result;
use async_trait::async_trait;
use muxkit_api_client::ApiClient;
use muxkit_core::{ApiEnvelope, Asset, Upload};

#[async_trait]
pub trait ProxyTransport: Send + Sync {
    /// POST /api/create-upload
    async fn create_upload(&self) -> Result<ApiEnvelope<Upload>>;

    /// PUT the file body to the vendor's upload URL.
    async fn put_file(&self, url: &str, file: &SelectedFile) -> Result<()>;

    /// GET /api/upload/{id}
    async fn get_upload(&self, upload_id: &str) -> Result<ApiEnvelope<Upload>>;

    /// GET /api/asset/{id}
    async fn get_asset(&self, asset_id: &str) -> Result<ApiEnvelope<Asset>>;
}

#[async_trait]
impl ProxyTransport for ApiClient {
    async fn create_upload(&self) -> Result<ApiEnvelope<Upload>> {
        ApiClient::create_upload(self).await
    }

    async fn put_file(&self, url: &str, file: &SelectedFile) -> Result<()> {
        ApiClient::put_file(self, url, file.body.clone(), &file.mime_type).await
    }

    async fn get_upload(&self, upload_id: &str) -> Result<ApiEnvelope<Upload>> {
        ApiClient::get_upload(self, upload_id).await
    }

    async fn get_asset(&self, asset_id: &str) -> Result<ApiEnvelope<Asset>> {
        ApiClient::get_asset(self, asset_id).await
    }
}
