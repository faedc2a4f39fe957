//! The file a user picked for upload.

use anyhow::{Context, Result};
use bytes::Bytes;
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A selected file: its body plus the size and MIME type the picker declared.
///
/// Validation works from the declared values only, the way a browser file
/// input reports them.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub body: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, body: Bytes) -> Self {
        let size = body.len() as u64;
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            body,
        }
    }

    /// Override the declared size.
    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Read a file from disk, declaring its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let body = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video")
            .to_string();
        let mime_type = mime_type_for(&name).to_string();

        Ok(Self::new(name, mime_type, Bytes::from(body)))
    }

    /// Declared size in MB (bytes / 1024 / 1024).
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / BYTES_PER_MB
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }
}

/// MIME type for a file name, by extension.
pub fn mime_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Videos
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        "mpeg" | "mpg" => "video/mpeg",
        "ogv" => "video/ogg",
        "3gp" => "video/3gpp",
        "ts" => "video/mp2t",
        "flv" => "video/x-flv",
        "wmv" => "video/x-ms-wmv",
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        // Documents
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for("clip.MP4"), "video/mp4");
        assert_eq!(mime_type_for("clip.mov"), "video/quicktime");
        assert_eq!(mime_type_for("photo.png"), "image/png");
        assert_eq!(mime_type_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_size_mb_uses_binary_megabytes() {
        let file = SelectedFile::new("a.mp4", "video/mp4", Bytes::new())
            .with_declared_size(500 * 1024 * 1024);
        assert_eq!(file.size_mb(), 500.0);

        let file = file.with_declared_size(500 * 1024 * 1024 + 1);
        assert!(file.size_mb() > 500.0);
    }

    #[test]
    fn test_is_video() {
        assert!(SelectedFile::new("a", "video/webm", Bytes::new()).is_video());
        assert!(!SelectedFile::new("a", "image/gif", Bytes::new()).is_video());
        assert!(!SelectedFile::new("a", "", Bytes::new()).is_video());
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = SelectedFile::from_path("/definitely/not/here.mp4")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
