//! Subtitle source acquisition and conversion

use bytes::Bytes;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

use super::webvtt::{srt_to_vtt, ConversionMode};
use crate::error::{Result, SubtitleError};
use crate::locate::SRT_EXTENSION;
use crate::types::PlaybackOptions;

/// Where subtitle bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleSource {
    /// An existing file on local disk
    Local(PathBuf),
    /// An http(s) URL
    Remote(Url),
}

impl SubtitleSource {
    /// Classify a source string: existing files are local, anything else
    /// must be an http(s) URL.
    pub async fn resolve(source: &str) -> Result<Self> {
        let path = Path::new(source);
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Ok(SubtitleSource::Local(path.to_path_buf()));
        }

        let url = Url::parse(source)
            .map_err(|e| SubtitleError::InvalidSource(format!("{}: {}", source, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(SubtitleSource::Remote(url)),
            scheme => Err(SubtitleError::InvalidSource(format!(
                "{}: unsupported scheme {:?}",
                source, scheme
            ))),
        }
    }

    /// Whether the source is in the legacy SRT format, by extension
    pub fn is_srt(&self) -> bool {
        let path = match self {
            SubtitleSource::Local(path) => path.as_path(),
            SubtitleSource::Remote(url) => Path::new(url.path()),
        };
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SRT_EXTENSION))
    }

    /// Read the raw source bytes
    pub async fn read(&self, client: &Client) -> Result<Bytes> {
        match self {
            SubtitleSource::Local(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
            SubtitleSource::Remote(url) => {
                let response = client.get(url.clone()).send().await?.error_for_status()?;
                Ok(response.bytes().await?)
            }
        }
    }
}

/// Produce servable content for `source`.
///
/// SRT sources are converted to WebVTT; everything else is passed through
/// byte for byte.
pub async fn convert(source: &str, options: &PlaybackOptions, client: &Client) -> Result<Bytes> {
    let source = SubtitleSource::resolve(source).await?;
    let content = source.read(client).await?;

    if !source.is_srt() {
        return Ok(content);
    }

    let mode = ConversionMode::from_bypass(options.bypass_srt_encoding);
    let vtt = srt_to_vtt(&content, mode)?;
    tracing::debug!("converted srt to vtt: {:?} ({:?} mode)", source, mode);
    Ok(vtt)
}
