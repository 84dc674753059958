//! External media tool capability
//!
//! Container probing and subtitle stream extraction are delegated to the
//! ffmpeg command line tools. The pipeline only sees the [`MediaTool`]
//! trait, so tests can script both operations.

use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::config::ToolConfig;
use crate::error::{Result, SubtitleError};

/// Stream layout of a media container
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub streams: Vec<StreamEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamEntry {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub codec_name: Option<String>,
}

impl StreamInfo {
    /// Whether any stream is a subtitle stream
    pub fn has_subtitle(&self) -> bool {
        self.streams
            .iter()
            .any(|s| s.codec_type.as_deref() == Some("subtitle"))
    }
}

/// Narrow interface over the transcoding tool
pub trait MediaTool {
    /// Inspect the stream layout of `video` without decoding it
    fn probe(&self, video: &Path) -> impl Future<Output = Result<StreamInfo>> + Send;

    /// Write the first subtitle stream of `video` as SRT to `output`
    fn extract_subtitle_stream(
        &self,
        video: &Path,
        output: &Path,
    ) -> impl Future<Output = Result<PathBuf>> + Send;
}

/// [`MediaTool`] backed by the `ffprobe` and `ffmpeg` binaries
#[derive(Debug, Clone, Default)]
pub struct FfmpegTool {
    config: ToolConfig,
}

impl FfmpegTool {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    fn probe_args(video: &Path) -> Vec<String> {
        vec![
            "-v".into(),
            "error".into(),
            "-show_entries".into(),
            "stream=index,codec_type,codec_name".into(),
            "-of".into(),
            "json".into(),
            video.to_string_lossy().into_owned(),
        ]
    }

    fn extract_args(video: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".into(),
            "-v".into(),
            "error".into(),
            "-i".into(),
            video.to_string_lossy().into_owned(),
            "-vn".into(),
            "-an".into(),
            "-codec".into(),
            "srt".into(),
            "-map".into(),
            "0:s:0".into(),
            output.to_string_lossy().into_owned(),
        ]
    }
}

impl MediaTool for FfmpegTool {
    async fn probe(&self, video: &Path) -> Result<StreamInfo> {
        let output = Command::new(&self.config.ffprobe)
            .args(Self::probe_args(video))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| SubtitleError::Probe(format!("failed to run ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(SubtitleError::Probe(format!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| SubtitleError::Probe(format!("Failed to parse ffprobe output: {}", e)))
    }

    async fn extract_subtitle_stream(&self, video: &Path, output: &Path) -> Result<PathBuf> {
        tracing::debug!("Extracting subtitle stream from {}", video.display());

        let result = Command::new(&self.config.ffmpeg)
            .args(Self::extract_args(video, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SubtitleError::Extraction(format!("failed to run ffmpeg: {}", e)))?;

        if !result.status.success() {
            return Err(SubtitleError::Extraction(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        Ok(output.to_path_buf())
    }
}
