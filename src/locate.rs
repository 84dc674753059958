//! Subtitle source discovery
//!
//! Sources are tried in a fixed order and the first hit wins:
//! the explicit `subtitles` option, a sibling `.srt` next to the video,
//! then an embedded subtitle stream extracted from the container.

use std::path::{Path, PathBuf};

use crate::config::SubtitleConfig;
use crate::tool::MediaTool;
use crate::types::PlaybackOptions;

/// Extension of the legacy subtitle format
pub const SRT_EXTENSION: &str = "srt";

/// Outcome of subtitle discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// A path or URL to read subtitles from
    Found(String),
    /// No subtitles anywhere
    NotFound,
    /// An embedded stream exists but could not be extracted
    Failed(String),
}

/// Path of the `.srt` file sharing the video's directory and stem
pub fn sibling_subtitle_path(video: &Path) -> PathBuf {
    video.with_extension(SRT_EXTENSION)
}

/// Resolve a subtitle source for the lead playlist item.
///
/// Never fails; probe errors read as "no subtitles" and extraction errors
/// come back as [`Located::Failed`].
pub async fn locate<T: MediaTool>(
    options: &PlaybackOptions,
    tool: &T,
    config: &SubtitleConfig,
) -> Located {
    if let Some(subtitles) = &options.subtitles {
        return Located::Found(subtitles.clone());
    }

    let Some(video) = options.playlist.first().and_then(|item| item.file_path()) else {
        return Located::NotFound;
    };

    let sibling = sibling_subtitle_path(video);
    if tokio::fs::try_exists(&sibling).await.unwrap_or(false) {
        tracing::debug!("subtitles found in {}", sibling.display());
        return Located::Found(sibling.to_string_lossy().into_owned());
    }

    tracing::debug!("checking metadata for subtitles");
    let info = match tool.probe(video).await {
        Ok(info) => info,
        Err(e) => {
            tracing::debug!("probe of {} failed: {}", video.display(), e);
            return Located::NotFound;
        }
    };
    if !info.has_subtitle() {
        return Located::NotFound;
    }

    let target = config.extraction_path();
    match tool.extract_subtitle_stream(video, &target).await {
        Ok(path) => {
            tracing::debug!("finished subtitle extract to {}", path.display());
            Located::Found(path.to_string_lossy().into_owned())
        }
        Err(e) => {
            tracing::warn!("subtitle extract error: {}", e);
            Located::Failed(e.to_string())
        }
    }
}
