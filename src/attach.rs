//! Attaching the served subtitle track to the playback descriptor

use crate::types::{
    PlaybackOptions, PlaylistItem, TextTrackStyle, Track, TrackSubtype, TrackType,
    SUBTITLE_TRACK_ID, VTT_CONTENT_TYPE,
};

/// Foreground color used when the launch does not set `subtitle-color`
pub const DEFAULT_FOREGROUND_COLOR: &str = "#FFFF00FF";

/// Fixed style block with the two caller-configurable fields
pub fn text_track_style(options: &PlaybackOptions) -> TextTrackStyle {
    TextTrackStyle {
        background_color: "#00000000".to_string(),
        foreground_color: options
            .subtitle_color
            .clone()
            .unwrap_or_else(|| DEFAULT_FOREGROUND_COLOR.to_string()),
        edge_type: "OUTLINE".to_string(),
        edge_color: "#000000FF".to_string(),
        font_scale: options.subtitle_scale,
        font_style: "NORMAL".to_string(),
        font_family: "Droid Sans".to_string(),
        font_generic_family: "SANS_SERIF".to_string(),
        window_color: "#AA00FFFF".to_string(),
        window_rounded_corner_radius: 10,
        window_type: "NONE".to_string(),
    }
}

/// The single subtitle track pointing at `address`
pub fn subtitle_track(address: &str) -> Track {
    Track {
        track_id: SUBTITLE_TRACK_ID,
        kind: TrackType::Text,
        track_content_id: address.to_string(),
        track_content_type: VTT_CONTENT_TYPE.to_string(),
        name: "English".to_string(),
        language: "en-US".to_string(),
        subtype: TrackSubtype::Subtitles,
    }
}

/// Point `item` at the served subtitles and make the track active.
///
/// `style` comes from [`text_track_style`] on the launch options.
pub fn attach(item: &mut PlaylistItem, address: &str, style: TextTrackStyle) {
    let media = item.media.get_or_insert_with(Default::default);
    media.text_track_style = Some(style);
    media.tracks = Some(vec![subtitle_track(address)]);
    item.active_track_ids = Some(vec![SUBTITLE_TRACK_ID]);
}
