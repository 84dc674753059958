//! Axum router configuration

use axum::{body::Bytes, Router};
use tower_http::trace::TraceLayer;

use super::handlers::serve_subtitles;

/// Create the router: no routes, every request hits the subtitle handler
pub fn create_router(content: Bytes) -> Router {
    Router::new()
        .fallback(serve_subtitles)
        .layer(TraceLayer::new_for_http())
        .with_state(content)
}
