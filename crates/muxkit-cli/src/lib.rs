use anyhow::Context;
use clap::ValueEnum;
use muxkit_core::Asset;
use muxkit_player::{HtmlDocument, PlaybackHandlers, PlayerProps, VideoPlayer};
use muxkit_uploader::{HostCallback, UploadCompletion};
use serde::Serialize;
use std::sync::Arc;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Output of `muxkit list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

/// How the upload-complete output is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CallbackProfile {
    /// playback_id and asset_id only
    #[default]
    Positional,
    /// Also duration and status
    Structured,
}

impl CallbackProfile {
    /// Callback that prints the completion to stdout as JSON.
    pub fn printing_callback(self) -> HostCallback {
        match self {
            CallbackProfile::Positional => HostCallback::positional(|playback_id, asset_id| {
                let payload = serde_json::json!({
                    "playback_id": playback_id,
                    "asset_id": asset_id,
                });
                if let Err(e) = print_json(&payload) {
                    tracing::error!(error = %e, "Failed to print completion");
                }
            }),
            CallbackProfile::Structured => {
                HostCallback::structured(|completion: UploadCompletion| {
                    if let Err(e) = print_json(&completion) {
                        tracing::error!(error = %e, "Failed to print completion");
                    }
                })
            }
        }
    }
}

pub fn format_asset_table(assets: &[Asset]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<40} {:<10} {:>10} {:<30}\n",
        "Asset ID", "Status", "Duration", "Playback ID"
    ));
    out.push_str(&"-".repeat(93));
    out.push('\n');

    if assets.is_empty() {
        out.push_str("No videos found.\n");
        return out;
    }

    for asset in assets {
        let duration = asset
            .duration
            .map(|d| format!("{:.1}s", d))
            .unwrap_or_else(|| "-".to_string());
        let playback_id = asset
            .playback_ids
            .first()
            .map(|p| p.id.as_str())
            .unwrap_or("-");
        out.push_str(&format!(
            "{:<40} {:<10} {:>10} {:<30}\n",
            truncate_string(&asset.id, 40),
            asset.status.to_string(),
            duration,
            truncate_string(playback_id, 30)
        ));
    }
    out
}

/// Standalone HTML page embedding one player.
pub fn render_player_page(props: PlayerProps) -> String {
    let document = Arc::new(HtmlDocument::default());
    let player = VideoPlayer::mount(props, false, PlaybackHandlers::default(), document.clone());
    document.render(&player.view().to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use muxkit_core::AssetStatus;

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_exact() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_multibyte() {
        assert_eq!(truncate_string("vidéo-clé-finale", 8), "vidéo...");
    }

    fn asset(id: &str, status: AssetStatus, playback: Option<&str>) -> Asset {
        let mut value = serde_json::json!({"id": id, "status": status.to_string()});
        if let Some(pb) = playback {
            value["playback_ids"] = serde_json::json!([{"id": pb, "policy": "public"}]);
            value["duration"] = serde_json::json!(12.5);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_asset_table_rows() {
        let table = format_asset_table(&[
            asset("as_1", AssetStatus::Ready, Some("pb_1")),
            asset("as_2", AssetStatus::Preparing, None),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("as_1"));
        assert!(lines[2].contains("ready"));
        assert!(lines[2].contains("12.5s"));
        assert!(lines[2].contains("pb_1"));
        assert!(lines[3].contains("preparing"));
    }

    #[test]
    fn test_empty_asset_table() {
        assert!(format_asset_table(&[]).contains("No videos found."));
    }

    #[test]
    fn test_player_page() {
        let page = render_player_page(PlayerProps::new("pb_1").autoplay(true));
        assert!(page.contains(muxkit_player::PLAYER_SCRIPT_URL));
        assert!(page.contains("<mux-player playback-id=\"pb_1\" autoplay controls"));
    }

    #[test]
    fn test_each_player_page_loads_the_script() {
        let script_tag = format!(
            "<script async src=\"{}\"></script>",
            muxkit_player::PLAYER_SCRIPT_URL
        );
        let first = render_player_page(PlayerProps::new("pb_1"));
        let second = render_player_page(PlayerProps::new("pb_2"));
        assert_eq!(first.matches(&script_tag).count(), 1);
        assert_eq!(second.matches(&script_tag).count(), 1);
        assert!(second.contains("playback-id=\"pb_2\""));
    }

    #[test]
    fn test_list_format_values() {
        assert_eq!(ListFormat::default(), ListFormat::Table);
        assert_eq!(ListFormat::from_str("json", true), Ok(ListFormat::Json));
        assert!(ListFormat::from_str("yaml", true).is_err());
    }
}
