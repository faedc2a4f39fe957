//! Test helpers: router over an in-memory vendor.
//!
//! Run with: `cargo test -p muxkit-api --test proxy_test`

use async_trait::async_trait;
use axum_test::TestServer;
use muxkit_api::setup::routes;
use muxkit_api::state::AppState;
use muxkit_core::{Config, CreateUploadRequest, ProxyConfig};
use muxkit_vendor::{record_str, VendorError, VendorRecord, VendorResult, VideoVendor};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const NOT_FOUND_MESSAGE: &str =
    "The requested resource either doesn't exist or you don't have access to it.";

/// In-memory vendor keyed by record ID. Records are stored as given.
#[derive(Default)]
pub struct FakeVendor {
    uploads: Mutex<HashMap<String, VendorRecord>>,
    assets: Mutex<Vec<VendorRecord>>,
    created: Mutex<Vec<CreateUploadRequest>>,
    list_limits: Mutex<Vec<u32>>,
    outage: Mutex<Option<String>>,
}

impl FakeVendor {
    pub fn insert_upload(&self, raw: Value) {
        let id = record_str(&raw, "id").to_string();
        self.uploads.lock().unwrap().insert(id, raw);
    }

    pub fn insert_asset(&self, raw: Value) {
        self.assets.lock().unwrap().push(raw);
    }

    /// Every call fails with `message` until cleared.
    pub fn fail_with(&self, message: &str) {
        *self.outage.lock().unwrap() = Some(message.to_string());
    }

    pub fn created_requests(&self) -> Vec<CreateUploadRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn list_limits(&self) -> Vec<u32> {
        self.list_limits.lock().unwrap().clone()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.lock().unwrap().len()
    }

    fn check_outage(&self) -> VendorResult<()> {
        match self.outage.lock().unwrap().as_ref() {
            Some(message) => Err(VendorError::Api {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> VendorError {
        VendorError::Api {
            status: 404,
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }
}

#[async_trait]
impl VideoVendor for FakeVendor {
    async fn create_upload(&self, request: &CreateUploadRequest) -> VendorResult<VendorRecord> {
        self.check_outage()?;
        self.created.lock().unwrap().push(request.clone());

        let id = format!("up_{}", self.created.lock().unwrap().len());
        let upload = json!({
            "id": id,
            "url": format!("https://storage.example/upload/{}", id),
            "status": "waiting",
            "timeout": 3600,
            "cors_origin": request.cors_origin,
            "new_asset_settings": request.new_asset_settings,
        });
        self.uploads
            .lock()
            .unwrap()
            .insert(id, upload.clone());
        Ok(upload)
    }

    async fn retrieve_upload(&self, upload_id: &str) -> VendorResult<VendorRecord> {
        self.check_outage()?;
        self.uploads
            .lock()
            .unwrap()
            .get(upload_id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn retrieve_asset(&self, asset_id: &str) -> VendorResult<VendorRecord> {
        self.check_outage()?;
        self.assets
            .lock()
            .unwrap()
            .iter()
            .find(|a| record_str(a, "id") == asset_id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn list_assets(&self, limit: u32) -> VendorResult<Vec<VendorRecord>> {
        self.check_outage()?;
        self.list_limits.lock().unwrap().push(limit);
        Ok(self
            .assets
            .lock()
            .unwrap()
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn delete_asset(&self, asset_id: &str) -> VendorResult<()> {
        self.check_outage()?;
        let mut assets = self.assets.lock().unwrap();
        let before = assets.len();
        assets.retain(|a| record_str(a, "id") != asset_id);
        if assets.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("MUX_TOKEN_ID".to_string(), "test-token".to_string());
    vars.insert("MUX_TOKEN_SECRET".to_string(), "test-secret".to_string());
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config(Box::new(ProxyConfig::from_map(&vars).unwrap()))
}

pub struct TestApp {
    pub server: TestServer,
    pub vendor: Arc<FakeVendor>,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

pub fn setup_test_app_with(extra: &[(&str, &str)]) -> TestApp {
    let config = test_config(extra);
    let vendor = Arc::new(FakeVendor::default());
    let state = Arc::new(AppState::new(config.clone(), vendor.clone()));
    let router = routes::setup_routes(&config, state).unwrap();

    TestApp {
        server: TestServer::new(router).unwrap(),
        vendor,
    }
}
