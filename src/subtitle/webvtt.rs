//! WebVTT generation from SRT

use bytes::{BufMut, Bytes, BytesMut};

use super::srt::{self, SubtitleCue};
use crate::error::Result;

const HEADER: &str = "WEBVTT";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How SRT content is turned into WebVTT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Decode, parse and re-emit every cue
    Full,
    /// Keep the original bytes, add the header and fix timing separators
    Raw,
}

impl ConversionMode {
    pub fn from_bypass(bypass_srt_encoding: bool) -> Self {
        if bypass_srt_encoding {
            ConversionMode::Raw
        } else {
            ConversionMode::Full
        }
    }
}

/// Format a timestamp as WebVTT timestamp (HH:MM:SS.mmm)
pub fn format_timestamp(ms: i64) -> String {
    let total_ms = ms.max(0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Incremental WebVTT document builder
#[derive(Debug)]
pub struct WebVttWriter {
    out: String,
}

impl Default for WebVttWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl WebVttWriter {
    pub fn new() -> Self {
        let mut out = String::with_capacity(4096);
        out.push_str(HEADER);
        out.push_str("\n\n");
        Self { out }
    }

    pub fn write_cue(&mut self, cue: &SubtitleCue) {
        if let Some(id) = &cue.identifier {
            self.out.push_str(id);
            self.out.push('\n');
        }
        self.out.push_str(&format_timestamp(cue.start_ms));
        self.out.push_str(" --> ");
        self.out.push_str(&format_timestamp(cue.end_ms));
        self.out.push('\n');
        if !cue.text.is_empty() {
            self.out.push_str(&cue.text);
            self.out.push('\n');
        }
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Convert SRT bytes to WebVTT bytes
pub fn srt_to_vtt(content: &[u8], mode: ConversionMode) -> Result<Bytes> {
    match mode {
        ConversionMode::Full => {
            let cues = srt::parse(&srt::decode_text(content))?;
            let mut writer = WebVttWriter::new();
            for cue in &cues {
                writer.write_cue(cue);
            }
            Ok(Bytes::from(writer.finish()))
        }
        ConversionMode::Raw => Ok(wrap_raw(content)),
    }
}

/// Prefix the WebVTT header and rewrite `,` to `.` on timing lines only.
/// Every other byte is copied through untouched.
fn wrap_raw(content: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(content.len() + HEADER.len() + 8);

    let body = match content.strip_prefix(UTF8_BOM) {
        Some(rest) => {
            out.put_slice(UTF8_BOM);
            rest
        }
        None => content,
    };
    out.put_slice(HEADER.as_bytes());
    out.put_slice(b"\n\n");

    for line in body.split_inclusive(|&b| b == b'\n') {
        if line.windows(3).any(|w| w == b"-->") {
            out.extend(line.iter().map(|&b| if b == b',' { b'.' } else { b }));
        } else {
            out.put_slice(line);
        }
    }

    out.freeze()
}
