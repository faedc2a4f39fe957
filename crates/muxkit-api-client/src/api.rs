//! Domain methods for the proxy API client, one per proxy route.

use crate::ApiClient;
use anyhow::Result;
use muxkit_core::{ApiEnvelope, Asset, Upload};
use serde_json::Value as JsonValue;

impl ApiClient {
    /// POST /api/create-upload
    pub async fn create_upload(&self) -> Result<ApiEnvelope<Upload>> {
        self.post_envelope("/api/create-upload").await
    }

    /// GET /api/upload/{id}
    pub async fn get_upload(&self, upload_id: &str) -> Result<ApiEnvelope<Upload>> {
        self.get_envelope(&format!("/api/upload/{}", urlencoding::encode(upload_id)))
            .await
    }

    /// GET /api/asset/{id}
    pub async fn get_asset(&self, asset_id: &str) -> Result<ApiEnvelope<Asset>> {
        self.get_envelope(&format!("/api/asset/{}", urlencoding::encode(asset_id)))
            .await
    }

    /// GET /api/videos
    pub async fn list_videos(&self) -> Result<ApiEnvelope<Vec<Asset>>> {
        self.get_envelope("/api/videos").await
    }

    /// DELETE /api/asset/{id}; success carries `message`, not `data`.
    pub async fn delete_asset(&self, asset_id: &str) -> Result<ApiEnvelope<JsonValue>> {
        self.delete_envelope(&format!("/api/asset/{}", urlencoding::encode(asset_id)))
            .await
    }
}
