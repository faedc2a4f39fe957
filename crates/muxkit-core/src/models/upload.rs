use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

use super::asset::PUBLIC_PLAYBACK_POLICY;

pub const MP4_SUPPORT_NONE: &str = "none";

/// Lifecycle of a direct upload on the vendor side.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Waiting,
    AssetCreated,
    Errored,
    Cancelled,
    TimedOut,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Display for UploadStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadStatus::Waiting => write!(f, "waiting"),
            UploadStatus::AssetCreated => write!(f, "asset_created"),
            UploadStatus::Errored => write!(f, "errored"),
            UploadStatus::Cancelled => write!(f, "cancelled"),
            UploadStatus::TimedOut => write!(f, "timed_out"),
            UploadStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Settings applied to the asset the vendor creates once the upload lands.
///
/// Values are kept as the vendor spells them; anything else the vendor echoes
/// back lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct NewAssetSettings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playback_policy: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp4_support: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// Body of the vendor's "create upload" call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CreateUploadRequest {
    pub new_asset_settings: NewAssetSettings,
    pub cors_origin: String,
}

impl CreateUploadRequest {
    /// Public playback, no MP4 renditions, uploads accepted from `cors_origin`.
    pub fn public(cors_origin: impl Into<String>) -> Self {
        Self {
            new_asset_settings: NewAssetSettings {
                playback_policy: vec![PUBLIC_PLAYBACK_POLICY.to_string()],
                mp4_support: Some(MP4_SUPPORT_NONE.to_string()),
                extra: BTreeMap::new(),
            },
            cors_origin: cors_origin.into(),
        }
    }
}

/// Error attached to an upload that failed on the vendor side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct UploadFailure {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// Vendor upload record.
///
/// `url` is only present while the upload is accepting data; `asset_id` appears
/// once the vendor has started processing. Fields this type does not model are
/// kept in `extra` so the proxy can pass the record through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Upload {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_asset_settings: Option<NewAssetSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<UploadFailure>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_upload_request_shape() {
        let body = serde_json::to_value(CreateUploadRequest::public("*")).unwrap();
        assert_eq!(
            body,
            json!({
                "new_asset_settings": {
                    "playback_policy": ["public"],
                    "mp4_support": "none"
                },
                "cors_origin": "*"
            })
        );
    }

    #[test]
    fn test_upload_keeps_unmodelled_fields() {
        let raw = json!({
            "id": "up_1",
            "url": "https://storage.example/put",
            "status": "waiting",
            "timeout": 3600,
            "test": false
        });
        let upload: Upload = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(upload.status, UploadStatus::Waiting);
        assert_eq!(upload.asset_id, None);
        assert_eq!(upload.extra.get("test"), Some(&json!(false)));
        assert_eq!(serde_json::to_value(&upload).unwrap(), raw);
    }

    #[test]
    fn test_create_reply_without_status() {
        let upload: Upload = serde_json::from_value(json!({
            "id": "up_1",
            "url": "https://storage.example/put"
        }))
        .unwrap();
        assert_eq!(upload.status, UploadStatus::Unknown);
        assert_eq!(upload.url.as_deref(), Some("https://storage.example/put"));
    }

    #[test]
    fn test_nested_settings_survive_reserialization() {
        let raw = json!({
            "id": "up_4",
            "status": "waiting",
            "new_asset_settings": {
                "playback_policies": ["drm"],
                "mp4_support": "capped-1080p",
                "video_quality": "plus"
            },
            "error": {"type": "invalid_input", "message": "bad", "code": 7}
        });
        let upload: Upload = serde_json::from_value(raw.clone()).unwrap();
        let settings = upload.new_asset_settings.as_ref().unwrap();
        assert_eq!(settings.mp4_support.as_deref(), Some("capped-1080p"));
        assert!(settings.playback_policy.is_empty());
        assert_eq!(serde_json::to_value(&upload).unwrap(), raw);
    }

    #[test]
    fn test_upload_status_unknown_value() {
        let upload: Upload =
            serde_json::from_value(json!({"id": "up_2", "status": "paused"})).unwrap();
        assert_eq!(upload.status, UploadStatus::Unknown);
    }

    #[test]
    fn test_upload_with_asset_and_error() {
        let upload: Upload = serde_json::from_value(json!({
            "id": "up_3",
            "status": "errored",
            "asset_id": "as_9",
            "error": {"type": "invalid_input", "message": "Unsupported codec"}
        }))
        .unwrap();
        assert_eq!(upload.asset_id.as_deref(), Some("as_9"));
        let failure = upload.error.unwrap();
        assert_eq!(failure.kind.as_deref(), Some("invalid_input"));
        assert_eq!(failure.message.as_deref(), Some("Unsupported codec"));
    }
}
