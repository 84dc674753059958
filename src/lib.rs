//! Subtitle support for Cast launches
//!
//! Finds subtitles for the single video being launched (explicit source,
//! sibling `.srt`, or a stream embedded in the container), converts SRT to
//! WebVTT, serves the result over a local HTTP listener and attaches the
//! track to the playback descriptor.

pub mod attach;
pub mod config;
pub mod config_file;
pub mod error;
pub mod http;
pub mod locate;
pub mod pipeline;
pub mod subtitle;
pub mod tool;
pub mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::SubtitleConfig;
pub use error::{Result, SubtitleError};
pub use http::SubtitleServer;
pub use pipeline::{Outcome, SubtitlePipeline};
pub use tool::{FfmpegTool, MediaTool, StreamInfo};
pub use types::{HostMode, LaunchContext, PlaybackOptions, PlaylistItem};
