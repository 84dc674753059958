//! HTTP server module
//!
//! This module serves converted subtitles to the playback device:
//! - Axum router answering every request with the same document
//! - Listener binding and background serving
//! - Local network address discovery

pub mod handlers;
pub mod routes;
pub mod server;

pub use handlers::VTT_MIME;
pub use routes::create_router;
pub use server::{detect_local_ip, serve, SubtitleServer};
