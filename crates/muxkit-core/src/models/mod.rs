pub mod asset;
pub mod envelope;
pub mod upload;

pub use asset::{Asset, AssetStatus, PlaybackId, PUBLIC_PLAYBACK_POLICY};
pub use envelope::ApiEnvelope;
pub use upload::{
    CreateUploadRequest, NewAssetSettings, Upload, UploadFailure, UploadStatus, MP4_SUPPORT_NONE,
};
