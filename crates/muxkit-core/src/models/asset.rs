use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Processing status of a vendor asset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Preparing,
    Ready,
    Errored,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Display for AssetStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AssetStatus::Preparing => write!(f, "preparing"),
            AssetStatus::Ready => write!(f, "ready"),
            AssetStatus::Errored => write!(f, "errored"),
            AssetStatus::Unknown => write!(f, "unknown"),
        }
    }
}

pub const PUBLIC_PLAYBACK_POLICY: &str = "public";

/// Token the player element uses to stream an asset.
///
/// `policy` is kept as the vendor spells it ("public", "signed", "drm", ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PlaybackId {
    pub id: String,
    #[serde(default)]
    pub policy: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl PlaybackId {
    pub fn is_public(&self) -> bool {
        self.policy == PUBLIC_PLAYBACK_POLICY
    }
}

/// Vendor asset record. Always re-fetched, never cached locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playback_ids: Vec<PlaybackId>,
    /// Seconds; known once the vendor has inspected the media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Unix timestamp as a string, the way the vendor reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stored_resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp4_support: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl Asset {
    pub fn is_ready(&self) -> bool {
        self.status == AssetStatus::Ready
    }

    /// First playback identifier, only once the asset is ready.
    pub fn ready_playback_id(&self) -> Option<&str> {
        if !self.is_ready() {
            return None;
        }
        self.playback_ids.first().map(|p| p.id.as_str())
    }
}
