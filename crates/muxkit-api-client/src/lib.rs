//! HTTP client for the muxkit proxy API.
//!
//! Every proxy route answers with `{success, data | message | error}`, including
//! on failure statuses, so the envelope helpers decode the body whatever the
//! status and leave interpretation to the caller. Only bodies that are not an
//! envelope turn into `Err`. The uploader and CLI crates use this client directly.

pub mod api;

use anyhow::{Context, Result};
use bytes::Bytes;
use muxkit_core::ApiEnvelope;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Video bodies can be hundreds of megabytes.
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// HTTP client for the proxy API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: MUXKIT_BACKEND_URL, defaulting to a local proxy.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("MUXKIT_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a proxy route and decode its envelope.
    pub async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> Result<ApiEnvelope<T>> {
        self.send_envelope(self.client.get(self.build_url(path)))
            .await
    }

    /// POST a proxy route without a body and decode its envelope.
    pub async fn post_envelope<T: DeserializeOwned>(&self, path: &str) -> Result<ApiEnvelope<T>> {
        self.send_envelope(self.client.post(self.build_url(path)))
            .await
    }

    /// DELETE a proxy route and decode its envelope.
    pub async fn delete_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>> {
        self.send_envelope(self.client.delete(self.build_url(path)))
            .await
    }

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope<T>> {
        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        match serde_json::from_str::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                body
            )),
            Err(e) => Err(anyhow::Error::new(e).context("Failed to parse response envelope")),
        }
    }

    /// PUT raw bytes to a pre-signed upload URL. The URL is absolute and
    /// carries its own authorization, so nothing from this client is attached.
    pub async fn put_file(&self, url: &str, body: Bytes, content_type: &str) -> Result<()> {
        let size = body.len();
        let response = self
            .client
            .put(url)
            .timeout(TRANSFER_TIMEOUT)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .context("Failed to send upload body")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Upload failed with status {}: {}",
                status,
                error_text
            ));
        }

        tracing::debug!(size, %status, "Upload body accepted");
        Ok(())
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

pub use muxkit_core::{Asset, Upload};
