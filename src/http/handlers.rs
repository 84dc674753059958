use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};

/// Content type of every subtitle response
pub const VTT_MIME: &str = "text/vtt;charset=utf-8";

/// Serves the subtitle document for any method and path
pub async fn serve_subtitles(State(content): State<Bytes>) -> Result<Response, StatusCode> {
    tracing::debug!("incoming request");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
        .header(header::CONTENT_LENGTH, content.len())
        .header(header::CONTENT_TYPE, HeaderValue::from_static(VTT_MIME))
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Response building error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
