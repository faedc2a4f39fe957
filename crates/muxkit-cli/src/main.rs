//! muxkit CLI: a command-line host for the proxy.
//!
//! Backend URL comes from --backend-url or MUXKIT_BACKEND_URL.

use anyhow::Context;
use clap::{Parser, Subcommand};
use muxkit_api_client::{ApiClient, DEFAULT_BACKEND_URL};
use muxkit_cli::{
    format_asset_table, init_tracing, print_json, render_player_page, CallbackProfile, ListFormat,
};
use muxkit_player::PlayerProps;
use muxkit_uploader::{SelectedFile, TracingObserver, UploaderConfig, UploaderWidget};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "muxkit", about = "Mux video proxy CLI")]
struct Cli {
    /// Proxy base URL
    #[arg(long, env = "MUXKIT_BACKEND_URL", default_value = DEFAULT_BACKEND_URL, global = true)]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a video file and wait until it is ready to play
    Upload {
        /// Path to the video file
        file: std::path::PathBuf,
        /// Maximum accepted file size in MB
        #[arg(long, default_value = "500")]
        max_size_mb: u64,
        /// Shape of the completion output
        #[arg(long, value_enum, default_value_t = CallbackProfile::Positional)]
        profile: CallbackProfile,
    },
    /// List videos
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },
    /// Get a direct upload by ID
    UploadStatus {
        /// Upload ID
        id: String,
    },
    /// Get an asset by ID
    Asset {
        /// Asset ID
        id: String,
    },
    /// Delete an asset by ID
    Delete {
        /// Asset ID
        id: String,
    },
    /// Print an HTML page embedding the player
    Player {
        /// Playback ID
        playback_id: String,
        #[arg(long)]
        autoplay: bool,
        #[arg(long)]
        no_controls: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let backend_url = cli.backend_url;
    let client = || ApiClient::new(backend_url.clone()).context("Failed to create API client");

    match cli.command {
        Commands::Upload {
            file,
            max_size_mb,
            profile,
        } => {
            let file = SelectedFile::from_path(&file).await?;
            let mut config = UploaderConfig::new(backend_url.clone());
            config.max_file_size_mb = max_size_mb;

            let widget = UploaderWidget::with_observer(
                config,
                Arc::new(client()?),
                Arc::new(TracingObserver),
            );
            widget
                .select(file, profile.printing_callback())
                .await
                .map_err(|e| anyhow::anyhow!(e.alert_message()))?;
        }
        Commands::List { format } => {
            let response = client()?.list_videos().await?;
            match format {
                ListFormat::Json => print_json(&response)?,
                ListFormat::Table => {
                    let assets = response.into_data().map_err(anyhow::Error::msg)?;
                    print!("{}", format_asset_table(&assets));
                }
            }
        }
        Commands::UploadStatus { id } => {
            let response = client()?.get_upload(&id).await?;
            print_json(&response)?;
        }
        Commands::Asset { id } => {
            let response = client()?.get_asset(&id).await?;
            print_json(&response)?;
        }
        Commands::Delete { id } => {
            let response = client()?.delete_asset(&id).await?;
            print_json(&response)?;
        }
        Commands::Player {
            playback_id,
            autoplay,
            no_controls,
        } => {
            let props = PlayerProps::new(playback_id)
                .autoplay(autoplay)
                .show_controls(!no_controls);
            print!("{}", render_player_page(props));
        }
    }

    Ok(())
}
