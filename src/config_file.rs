//! Configuration file support
//!
//! Loads subtitle service configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{SubtitleConfig, ToolConfig, DEFAULT_SUBTITLE_PORT};
use crate::error::{Result, SubtitleError};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Listener settings
    pub server: ServerSettings,
    /// External tool settings
    pub tools: Option<ToolSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Default subtitle port
    pub port: u16,
    /// Scratch directory for extracted subtitle streams
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| SubtitleError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SubtitleError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        Self {
            server: ServerSettings {
                port: DEFAULT_SUBTITLE_PORT,
                scratch_dir: None,
            },
            tools: Some(ToolSettings {
                ffmpeg: Some("ffmpeg".to_string()),
                ffprobe: Some("ffprobe".to_string()),
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
        }
    }

    /// Convert to SubtitleConfig
    pub fn into_subtitle_config(self) -> SubtitleConfig {
        let defaults = SubtitleConfig::default();
        let tools = match self.tools {
            Some(t) => ToolConfig {
                ffmpeg: t.ffmpeg.unwrap_or(defaults.tools.ffmpeg),
                ffprobe: t.ffprobe.unwrap_or(defaults.tools.ffprobe),
            },
            None => defaults.tools,
        };

        let (log_level, log_format) = match self.logging {
            Some(l) => (l.level, l.format.unwrap_or(defaults.log_format)),
            None => (defaults.log_level, defaults.log_format),
        };

        SubtitleConfig {
            default_port: self.server.port,
            scratch_dir: self.server.scratch_dir.unwrap_or(defaults.scratch_dir),
            tools,
            log_level,
            log_format,
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    ConfigFile::default_config().to_file(path)
}
