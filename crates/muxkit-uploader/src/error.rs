//! Uploader error taxonomy.
//!
//! Every variant is handled inside the orchestrator: it becomes an alert plus a
//! progress reset, and the host's completion slot is left untouched.

use crate::phase::PhaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File size exceeds {max_mb}MB limit")]
    FileTooLarge { size_mb: f64, max_mb: u64 },

    #[error("Please select a valid video file")]
    InvalidFileType { mime_type: String },

    #[error("Failed to create upload URL")]
    UploadUrlCreationFailed { reason: String },

    #[error("Upload failed")]
    TransferFailed { reason: String },

    #[error("Upload processing timeout")]
    UploadTimeout { attempts: u32 },

    #[error("Asset {asset_id} is ready but has no playback ID")]
    MissingPlaybackId { asset_id: String },

    #[error("An upload is already in progress")]
    Busy,

    #[error("Component will be functional in preview/published app")]
    EditorMode,

    #[error(transparent)]
    Phase(#[from] PhaseError),
}

impl UploadError {
    /// Rejected before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UploadError::FileTooLarge { .. } | UploadError::InvalidFileType { .. }
        )
    }

    /// Text shown to the user.
    ///
    /// Validation failures are shown as-is; failures of the remote sequence are
    /// prefixed with "Upload Error: ".
    pub fn alert_message(&self) -> String {
        match self {
            UploadError::Busy | UploadError::EditorMode => self.to_string(),
            e if e.is_validation() => e.to_string(),
            e => format!("Upload Error: {}", e),
        }
    }

    /// Underlying cause, when the variant carries one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            UploadError::UploadUrlCreationFailed { reason }
            | UploadError::TransferFailed { reason } => Some(reason),
            _ => None,
        }
    }
}

pub type UploadResult<T> = Result<T, UploadError>;
