//! Cast subtitle server
//!
//! Runs the subtitle pipeline for one local video, prints the resulting
//! playlist item as JSON and keeps serving until interrupted.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cast_subtitles::config_file::ConfigFile;
use cast_subtitles::{
    HostMode, LaunchContext, Outcome, PlaybackOptions, PlaylistItem, SubtitleConfig,
    SubtitlePipeline,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "cast-subtitles";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Video file the subtitles belong to
    video: PathBuf,

    /// Subtitle path or URL; skips discovery
    #[arg(long)]
    subtitles: Option<String>,

    /// Port to serve subtitles on
    #[arg(long)]
    subtitle_port: Option<u16>,

    /// Subtitle foreground color (#RRGGBBAA)
    #[arg(long)]
    subtitle_color: Option<String>,

    /// Subtitle font scale
    #[arg(long)]
    subtitle_scale: Option<f64>,

    /// Keep SRT bytes as-is instead of re-encoding them
    #[arg(long)]
    bypass_srt_encoding: bool,

    /// Address to advertise instead of the detected one
    #[arg(long)]
    myip: Option<String>,

    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

impl Args {
    fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            playlist: vec![PlaylistItem::for_file(&self.video)],
            subtitles: self.subtitles.clone(),
            subtitle_port: self.subtitle_port,
            subtitle_color: self.subtitle_color.clone(),
            subtitle_scale: self.subtitle_scale,
            bypass_srt_encoding: self.bypass_srt_encoding,
            myip: self.myip.clone(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = if args.config.exists() {
        match ConfigFile::from_file(&args.config) {
            Ok(cf) => Some(cf.into_subtitle_config()),
            Err(e) => {
                eprintln!(
                    "Failed to load config file {}: {}. Using defaults.",
                    args.config.display(),
                    e
                );
                None
            }
        }
    } else {
        None
    };
    let config = config.unwrap_or_default();

    init_logging(&config);
    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    tracing::info!("Configuration loaded: {:?}", config);

    let pipeline = SubtitlePipeline::from_config(config);
    let mut ctx = LaunchContext::new(HostMode::Launch, args.playback_options());

    let outcome = pipeline
        .run(&mut ctx, |ctx, outcome| {
            if let Some(item) = ctx.options.playlist.first() {
                match serde_json::to_string_pretty(item) {
                    Ok(json) => println!("{}", json),
                    Err(e) => tracing::warn!("Failed to encode playlist item: {}", e),
                }
            }
            outcome
        })
        .await?;

    match outcome {
        Outcome::Attached(server) => {
            tracing::info!("Serving subtitles at {}", server.address());
            tokio::signal::ctrl_c().await?;
            server.shutdown().await;
        }
        other => tracing::info!("No subtitles attached: {:?}", other),
    }

    Ok(())
}

/// Initialize logging with tracing
fn init_logging(config: &SubtitleConfig) {
    let level = &config.log_level;
    let default_filter = format!("cast_subtitles={},tower_http={}", level, level);
    let json = config.json_logs();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}
