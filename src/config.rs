//! Subtitle service configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Port the subtitle listener binds when the launch does not name one
pub const DEFAULT_SUBTITLE_PORT: u16 = 4101;

/// External tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Path or name of the ffmpeg binary
    pub ffmpeg: String,

    /// Path or name of the ffprobe binary
    pub ffprobe: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Subtitle service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleConfig {
    /// Port used when the launch options carry no `subtitle-port`
    pub default_port: u16,

    /// Directory receiving subtitle streams extracted from containers
    pub scratch_dir: PathBuf,

    /// External tool configuration
    pub tools: ToolConfig,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (json, pretty)
    pub log_format: String,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            default_port: DEFAULT_SUBTITLE_PORT,
            scratch_dir: std::env::temp_dir(),
            tools: ToolConfig::default(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl SubtitleConfig {
    /// Temporary file an embedded subtitle stream is extracted to.
    ///
    /// The name carries the process id so concurrent launches on one host
    /// never write the same file.
    pub fn extraction_path(&self) -> PathBuf {
        self.scratch_dir.join(format!(
            "cast_subtitles_pid{}_subtitles.srt",
            std::process::id()
        ))
    }

    /// Whether logs are written as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
