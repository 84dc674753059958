//! Launch context and Cast playback descriptor types
//!
//! These mirror the JSON the host hands over: unknown fields are kept in a
//! flattened map so the core only ever mutates the fields it owns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// MIME type advertised in the track descriptor
pub const VTT_CONTENT_TYPE: &str = "text/vtt";

/// Track id of the single subtitle track this crate produces
pub const SUBTITLE_TRACK_ID: u32 = 1;

/// What the host is doing with the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// Loading new media onto the device
    Launch,
    /// Attaching to a session already playing
    Attach,
}

/// Context handed to the subtitle pipeline by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchContext {
    pub mode: HostMode,
    pub options: PlaybackOptions,
}

impl LaunchContext {
    pub fn new(mode: HostMode, options: PlaybackOptions) -> Self {
        Self { mode, options }
    }
}

/// Playback request options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlaybackOptions {
    #[serde(default)]
    pub playlist: Vec<PlaylistItem>,

    /// Subtitle path or URL; after a successful launch, the served address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_scale: Option<f64>,

    /// Skip character decoding when converting SRT
    #[serde(default)]
    pub bypass_srt_encoding: bool,

    /// Address advertised to the device instead of the detected one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub myip: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One queued playable unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_track_ids: Option<Vec<u32>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlaylistItem {
    /// Item for a local video file
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            media: Some(Media {
                metadata: Some(MediaMetadata {
                    file_path: Some(path.into()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Absolute path of the source video, when the host knows it
    pub fn file_path(&self) -> Option<&Path> {
        self.media
            .as_ref()?
            .metadata
            .as_ref()?
            .file_path
            .as_deref()
    }
}

/// Cast media information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MediaMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_track_style: Option<TextTrackStyle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<Track>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display styling of text tracks on the receiver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTrackStyle {
    pub background_color: String,
    pub foreground_color: String,
    pub edge_type: String,
    pub edge_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_scale: Option<f64>,
    pub font_style: String,
    pub font_family: String,
    pub font_generic_family: String,
    pub window_color: String,
    pub window_rounded_corner_radius: u32,
    pub window_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackType {
    Text,
    Audio,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackSubtype {
    Subtitles,
    Captions,
    Descriptions,
    Chapters,
    Metadata,
}

/// Track descriptor as understood by the receiver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub track_id: u32,
    #[serde(rename = "type")]
    pub kind: TrackType,
    pub track_content_id: String,
    pub track_content_type: String,
    pub name: String,
    pub language: String,
    pub subtype: TrackSubtype,
}
