//! Subtitle pipeline for a single launch
//!
//! Locate -> convert -> serve -> attach. Every stage short-circuits on a
//! miss, and only a failure to bind the listener is reported as an error;
//! anything else leaves the playback descriptor untouched so playback goes
//! ahead without subtitles.

use reqwest::Client;

use crate::attach::{attach, text_track_style};
use crate::config::SubtitleConfig;
use crate::error::Result;
use crate::http::{serve, SubtitleServer};
use crate::locate::{locate, Located};
use crate::subtitle::convert;
use crate::tool::{FfmpegTool, MediaTool};
use crate::types::{HostMode, LaunchContext};

/// Result of one pipeline run
#[derive(Debug)]
pub enum Outcome {
    /// Not a single-item launch; nothing was looked at
    Skipped,
    /// No subtitle source could be resolved
    NotFound,
    /// A source was found but could not be read or converted
    Dropped(String),
    /// Subtitles are served and attached to the lead item
    Attached(SubtitleServer),
}

impl Outcome {
    pub fn is_attached(&self) -> bool {
        matches!(self, Outcome::Attached(_))
    }

    /// The running listener, if subtitles were attached
    pub fn server(&self) -> Option<&SubtitleServer> {
        match self {
            Outcome::Attached(server) => Some(server),
            _ => None,
        }
    }
}

/// Resolves, converts, serves and attaches subtitles for launches
pub struct SubtitlePipeline<T> {
    tool: T,
    config: SubtitleConfig,
    client: Client,
}

impl SubtitlePipeline<FfmpegTool> {
    /// Pipeline using the ffmpeg command line tools
    pub fn from_config(config: SubtitleConfig) -> Self {
        let tool = FfmpegTool::new(config.tools.clone());
        Self::new(tool, config)
    }
}

impl<T: MediaTool> SubtitlePipeline<T> {
    pub fn new(tool: T, config: SubtitleConfig) -> Self {
        Self {
            tool,
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &SubtitleConfig {
        &self.config
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Run the pipeline, then hand the context and outcome to `next`.
    ///
    /// `next` is called exactly once whatever happens, and its value is
    /// returned.
    pub async fn run<F, R>(&self, ctx: &mut LaunchContext, next: F) -> R
    where
        F: FnOnce(&mut LaunchContext, Result<Outcome>) -> R,
    {
        let outcome = self.attach_subtitles(ctx).await;
        next(ctx, outcome)
    }

    /// Run the pipeline on `ctx`.
    ///
    /// Returns an error only when the subtitle listener cannot be bound.
    pub async fn attach_subtitles(&self, ctx: &mut LaunchContext) -> Result<Outcome> {
        if ctx.mode != HostMode::Launch || ctx.options.playlist.len() != 1 {
            return Ok(Outcome::Skipped);
        }

        let source = match locate(&ctx.options, &self.tool, &self.config).await {
            Located::Found(source) => source,
            Located::NotFound => return Ok(Outcome::NotFound),
            Located::Failed(reason) => {
                tracing::debug!("no subtitles after failed extraction: {}", reason);
                return Ok(Outcome::NotFound);
            }
        };
        ctx.options.subtitles = Some(source.clone());

        let content = match convert(&source, &ctx.options, &self.client).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("dropping subtitles from {}: {}", source, e);
                return Ok(Outcome::Dropped(e.to_string()));
            }
        };
        tracing::debug!("loading subtitles {}", source);

        let server = serve(content, &ctx.options, &self.config).await?;
        let address = server.address().to_string();
        ctx.options.subtitles = Some(address.clone());

        let style = text_track_style(&ctx.options);
        if let Some(item) = ctx.options.playlist.first_mut() {
            attach(item, &address, style);
        }

        Ok(Outcome::Attached(server))
    }
}
