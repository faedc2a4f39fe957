//! Mux Video REST client.
//!
//! Every call authenticates with HTTP basic auth (token id / token secret).
//! Successful responses wrap the record in `{"data": ...}`; error responses
//! carry `{"error": {"type": ..., "messages": [...]}}`.

use async_trait::async_trait;
use muxkit_core::{CreateUploadRequest, MuxConfig};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::traits::{record_str, VendorError, VendorRecord, VendorResult, VideoVendor};

const VIDEO_API_PREFIX: &str = "/video/v1";

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    messages: Vec<String>,
}

/// Mux Video API client
#[derive(Clone)]
pub struct MuxClient {
    http_client: Client,
    base_url: String,
    token_id: String,
    token_secret: String,
}

impl Debug for MuxClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MuxClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl MuxClient {
    pub fn new(config: &MuxConfig) -> VendorResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VendorError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token_id: config.token_id.clone(),
            token_secret: config.token_secret.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, VIDEO_API_PREFIX, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.token_id, Some(&self.token_secret))
    }

    async fn dispatch(&self, request: RequestBuilder) -> VendorResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| VendorError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response)
    }

    async fn fetch_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> VendorResult<T> {
        let response = self.dispatch(request).await?;
        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|e| VendorError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

/// Turn a non-success response into `VendorError::Api`, keeping the vendor's wording.
async fn error_from_response(response: Response) -> VendorError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) if !parsed.error.messages.is_empty() => parsed.error.messages.join(" "),
        Ok(parsed) => parsed
            .error
            .kind
            .unwrap_or_else(|| status.to_string()),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status.to_string(),
    };

    VendorError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl VideoVendor for MuxClient {
    async fn create_upload(&self, request: &CreateUploadRequest) -> VendorResult<VendorRecord> {
        let upload: VendorRecord = self
            .fetch_data(self.http_client.post(self.url("/uploads")).json(request))
            .await?;
        tracing::debug!(
            upload_id = record_str(&upload, "id"),
            status = record_str(&upload, "status"),
            "Vendor upload created"
        );
        Ok(upload)
    }

    async fn retrieve_upload(&self, upload_id: &str) -> VendorResult<VendorRecord> {
        let path = format!("/uploads/{}", urlencoding::encode(upload_id));
        self.fetch_data(self.http_client.get(self.url(&path))).await
    }

    async fn retrieve_asset(&self, asset_id: &str) -> VendorResult<VendorRecord> {
        let path = format!("/assets/{}", urlencoding::encode(asset_id));
        self.fetch_data(self.http_client.get(self.url(&path))).await
    }

    async fn list_assets(&self, limit: u32) -> VendorResult<Vec<VendorRecord>> {
        let request = self
            .http_client
            .get(self.url("/assets"))
            .query(&[("limit", limit.to_string())]);
        self.fetch_data(request).await
    }

    async fn delete_asset(&self, asset_id: &str) -> VendorResult<()> {
        let path = format!("/assets/{}", urlencoding::encode(asset_id));
        self.dispatch(self.http_client.delete(self.url(&path)))
            .await?;
        Ok(())
    }
}
