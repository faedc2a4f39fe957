//! Scripted proxy transport for uploader tests.
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use muxkit_core::{ApiEnvelope, Asset, Upload};
use muxkit_uploader::{ProxyTransport, SelectedFile};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const UPLOAD_URL: &str = "https://storage.example/upload/up_1";

/// One scripted answer from the proxy.
#[derive(Debug, Clone)]
pub enum Reply {
    Envelope(Value),
    TransportError(String),
}

/// Replies are consumed in order; the last one repeats.
#[derive(Default)]
struct Script {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl Script {
    fn set(&self, replies: Vec<Reply>) {
        *self.replies.lock().unwrap() = replies.into();
    }

    fn next(&self) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies
                .front()
                .cloned()
                .unwrap_or_else(|| Reply::TransportError("no reply scripted".to_string()))
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn decode<T: serde::de::DeserializeOwned>(reply: Reply) -> Result<ApiEnvelope<T>> {
    match reply {
        Reply::Envelope(value) => Ok(serde_json::from_value(value)?),
        Reply::TransportError(message) => Err(anyhow!(message)),
    }
}

/// In-memory `ProxyTransport` with one reply queue per endpoint.
#[derive(Default)]
pub struct ScriptedTransport {
    create: Script,
    uploads: Script,
    assets: Script,
    put_failure: Mutex<Option<String>>,
    puts: Mutex<Vec<(String, String, usize)>>,
}

impl ScriptedTransport {
    /// Upload created, asset appears on the second poll and is ready on the second asset read.
    pub fn happy_path() -> Self {
        let transport = Self::default();
        transport.script_create(vec![Reply::Envelope(created_upload())]);
        transport.script_uploads(vec![
            Reply::Envelope(upload_waiting()),
            Reply::Envelope(upload_with_asset("as_1")),
        ]);
        transport.script_assets(vec![
            Reply::Envelope(asset_preparing("as_1")),
            Reply::Envelope(asset_ready("as_1", "pb_1")),
        ]);
        transport
    }

    pub fn script_create(&self, replies: Vec<Reply>) {
        self.create.set(replies);
    }

    pub fn script_uploads(&self, replies: Vec<Reply>) {
        self.uploads.set(replies);
    }

    pub fn script_assets(&self, replies: Vec<Reply>) {
        self.assets.set(replies);
    }

    pub fn fail_puts(&self, message: &str) {
        *self.put_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn create_calls(&self) -> usize {
        self.create.calls()
    }

    pub fn upload_calls(&self) -> usize {
        self.uploads.calls()
    }

    pub fn asset_calls(&self) -> usize {
        self.assets.calls()
    }

    /// (url, content type, body length) per PUT.
    pub fn puts(&self) -> Vec<(String, String, usize)> {
        self.puts.lock().unwrap().clone()
    }

    pub fn network_calls(&self) -> usize {
        self.create_calls() + self.upload_calls() + self.asset_calls() + self.puts().len()
    }
}

#[async_trait]
impl ProxyTransport for ScriptedTransport {
    async fn create_upload(&self) -> Result<ApiEnvelope<Upload>> {
        decode(self.create.next())
    }

    async fn put_file(&self, url: &str, file: &SelectedFile) -> Result<()> {
        self.puts.lock().unwrap().push((
            url.to_string(),
            file.mime_type.clone(),
            file.body.len(),
        ));
        match self.put_failure.lock().unwrap().clone() {
            Some(message) => Err(anyhow!(message)),
            None => Ok(()),
        }
    }

    async fn get_upload(&self, _upload_id: &str) -> Result<ApiEnvelope<Upload>> {
        decode(self.uploads.next())
    }

    async fn get_asset(&self, _asset_id: &str) -> Result<ApiEnvelope<Asset>> {
        decode(self.assets.next())
    }
}

pub fn video_file() -> SelectedFile {
    SelectedFile::new("clip.mp4", "video/mp4", Bytes::from_static(b"not really a video"))
}

pub fn created_upload() -> Value {
    json!({
        "success": true,
        "data": {"id": "up_1", "url": UPLOAD_URL, "status": "waiting", "timeout": 3600}
    })
}

pub fn upload_waiting() -> Value {
    json!({"success": true, "data": {"id": "up_1", "status": "waiting"}})
}

pub fn upload_with_asset(asset_id: &str) -> Value {
    json!({
        "success": true,
        "data": {"id": "up_1", "status": "asset_created", "asset_id": asset_id}
    })
}

pub fn asset_preparing(asset_id: &str) -> Value {
    json!({"success": true, "data": {"id": asset_id, "status": "preparing"}})
}

pub fn asset_ready(asset_id: &str, playback_id: &str) -> Value {
    json!({
        "success": true,
        "data": {
            "id": asset_id,
            "status": "ready",
            "duration": 12.5,
            "playback_ids": [{"id": playback_id, "policy": "public"}]
        }
    })
}

pub fn failure(message: &str) -> Value {
    json!({"success": false, "error": message})
}
