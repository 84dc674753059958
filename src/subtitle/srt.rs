//! SRT parsing

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Result, SubtitleError};

/// A single subtitle cue with timing and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    /// Cue number from the SRT file, kept as the WebVTT cue identifier
    pub identifier: Option<String>,
    /// Start time in milliseconds
    pub start_ms: i64,
    /// End time in milliseconds
    pub end_ms: i64,
    /// Text content, one line per `\n`
    pub text: String,
}

fn timing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\s*(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})\s*-->\s*(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})",
        )
        .expect("valid timing regex")
    })
}

fn override_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\\[^}]*\}").expect("valid override regex"))
}

/// Windows-1252 characters for bytes 0x80..=0x9F. Unassigned slots keep
/// their Latin-1 code point.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

fn cp1252_char(b: u8) -> char {
    match b {
        0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
        _ => b as char,
    }
}

/// Decode SRT bytes to text.
///
/// UTF-8 is used when valid (a leading BOM is dropped); anything else is
/// read as Windows-1252, the usual encoding of "ANSI" subtitle files.
pub fn decode_text(content: &[u8]) -> String {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    match std::str::from_utf8(content) {
        Ok(text) => text.to_string(),
        Err(_) => content.iter().map(|&b| cp1252_char(b)).collect(),
    }
}

fn parse_ms(h: &str, m: &str, s: &str, frac: &str) -> Result<i64> {
    let num = |v: &str| {
        v.parse::<i64>()
            .map_err(|e| SubtitleError::Conversion(format!("bad timestamp field {:?}: {}", v, e)))
    };
    // "5" after the separator means 500ms
    let millis = num(&format!("{:0<3}", frac))?;
    // Minutes and seconds have at most two digits; only hours can overflow
    let rest = num(m)? * 60_000 + num(s)? * 1000 + millis;
    num(h)?
        .checked_mul(3_600_000)
        .and_then(|ms| ms.checked_add(rest))
        .ok_or_else(|| {
            SubtitleError::Conversion(format!("timestamp out of range: {}:{}:{}", h, m, s))
        })
}

/// Parse a `start --> end` timing line, ignoring trailing position hints
pub fn parse_timing(line: &str) -> Result<(i64, i64)> {
    let caps = timing_regex()
        .captures(line)
        .ok_or_else(|| SubtitleError::Conversion(format!("invalid timing line: {:?}", line)))?;
    let start = parse_ms(&caps[1], &caps[2], &caps[3], &caps[4])?;
    let end = parse_ms(&caps[5], &caps[6], &caps[7], &caps[8])?;
    Ok((start, end))
}

/// Strip ASS style overrides such as `{\an8}` that some SRT files carry
fn clean_text(line: &str) -> String {
    override_tag_regex()
        .replace_all(line, "")
        .replace("-->", "--&gt;")
}

/// Parse SRT text into cues
pub fn parse(text: &str) -> Result<Vec<SubtitleCue>> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut cues = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !block.is_empty() {
                cues.push(parse_block(&block, cues.len() + 1)?);
                block.clear();
            }
        } else {
            block.push(line);
        }
    }

    Ok(cues)
}

fn parse_block(lines: &[&str], position: usize) -> Result<SubtitleCue> {
    let (identifier, timing_at) = if lines[0].contains("-->") {
        (None, 0)
    } else {
        (Some(lines[0].trim().to_string()), 1)
    };

    let timing = lines.get(timing_at).ok_or_else(|| {
        SubtitleError::Conversion(format!("cue {} has no timing line", position))
    })?;
    let (start_ms, end_ms) = parse_timing(timing)
        .map_err(|e| SubtitleError::Conversion(format!("cue {}: {}", position, e)))?;

    let text = lines[timing_at + 1..]
        .iter()
        .map(|l| clean_text(l))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(SubtitleCue {
        identifier,
        start_ms,
        end_ms,
        text,
    })
}
