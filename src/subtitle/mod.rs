//! Subtitle conversion module
//!
//! This module turns a resolved subtitle source into servable WebVTT:
//! - Source acquisition from disk or over HTTP(S)
//! - SRT cue parsing with charset fallback
//! - WebVTT generation
//! - Raw mode that keeps the original bytes

pub mod source;
pub mod srt;
pub mod webvtt;

pub use source::{convert, SubtitleSource};
pub use webvtt::ConversionMode;
