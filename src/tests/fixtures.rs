//! Test fixtures for pipeline tests
//!
//! Provides a scripted media tool and temporary video directories so the
//! pipeline runs without ffmpeg installed.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

use crate::config::SubtitleConfig;
use crate::error::{Result, SubtitleError};
use crate::tool::{MediaTool, StreamEntry, StreamInfo};
use crate::types::{HostMode, LaunchContext, PlaybackOptions, PlaylistItem};

pub const SAMPLE_SRT: &str =
    "1\n00:00:01,000 --> 00:00:03,000\nHello\n\n2\n00:00:04,000 --> 00:00:06,250\nWorld\n";

/// What the fake tool reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    SubtitleStream,
    NoSubtitleStream,
    ProbeFails,
    ExtractionFails,
}

/// Scripted [`MediaTool`] that counts its calls
#[derive(Debug)]
pub struct FakeTool {
    behavior: Behavior,
    probes: AtomicUsize,
    extracts: AtomicUsize,
}

impl FakeTool {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            probes: AtomicUsize::new(0),
            extracts: AtomicUsize::new(0),
        }
    }

    /// Container with a subtitle stream; extraction writes [`SAMPLE_SRT`]
    pub fn with_subtitle_stream() -> Self {
        Self::new(Behavior::SubtitleStream)
    }

    pub fn without_subtitle_stream() -> Self {
        Self::new(Behavior::NoSubtitleStream)
    }

    pub fn failing_probe() -> Self {
        Self::new(Behavior::ProbeFails)
    }

    /// Reports a subtitle stream but fails to extract it
    pub fn failing_extraction() -> Self {
        Self::new(Behavior::ExtractionFails)
    }

    pub fn probe_calls(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn extract_calls(&self) -> usize {
        self.extracts.load(Ordering::SeqCst)
    }
}

fn stream(index: usize, codec_type: &str, codec_name: &str) -> StreamEntry {
    StreamEntry {
        index,
        codec_type: Some(codec_type.to_string()),
        codec_name: Some(codec_name.to_string()),
    }
}

impl MediaTool for FakeTool {
    async fn probe(&self, _video: &Path) -> Result<StreamInfo> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let mut streams = vec![stream(0, "video", "h264"), stream(1, "audio", "aac")];
        match self.behavior {
            Behavior::ProbeFails => {
                return Err(SubtitleError::Probe("moov atom not found".to_string()))
            }
            Behavior::NoSubtitleStream => {}
            Behavior::SubtitleStream | Behavior::ExtractionFails => {
                streams.push(stream(2, "subtitle", "subrip"))
            }
        }
        Ok(StreamInfo { streams })
    }

    async fn extract_subtitle_stream(&self, _video: &Path, output: &Path) -> Result<PathBuf> {
        self.extracts.fetch_add(1, Ordering::SeqCst);
        if self.behavior == Behavior::ExtractionFails {
            return Err(SubtitleError::Extraction(
                "ffmpeg exited with exit status: 1".to_string(),
            ));
        }
        tokio::fs::write(output, SAMPLE_SRT).await?;
        Ok(output.to_path_buf())
    }
}

/// A video file in its own temporary directory
pub struct TestVideo {
    dir: TempDir,
    name: &'static str,
}

impl TestVideo {
    pub fn new(name: &'static str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::write(dir.path().join(name), b"").expect("create video file");
        Self { dir, name }
    }

    /// Write `<stem>.srt` next to the video
    pub fn with_sibling_srt(self, content: &str) -> Self {
        std::fs::write(self.sibling_path(), content).expect("write sibling srt");
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join(self.name)
    }

    pub fn sibling_path(&self) -> PathBuf {
        self.path().with_extension("srt")
    }

    /// Config whose scratch directory is private to this video
    pub fn config(&self) -> SubtitleConfig {
        SubtitleConfig {
            scratch_dir: self.dir.path().to_path_buf(),
            ..Default::default()
        }
    }
}

/// Single-item context for `video`, serving on an ephemeral loopback port
pub fn launch_context(video: &TestVideo, mode: HostMode) -> LaunchContext {
    LaunchContext::new(
        mode,
        PlaybackOptions {
            playlist: vec![PlaylistItem::for_file(video.path())],
            subtitle_port: Some(0),
            myip: Some("127.0.0.1".to_string()),
            ..Default::default()
        },
    )
}
