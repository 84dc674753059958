//! End-to-end pipeline tests against a live listener

use axum::body::Bytes;
use reqwest::header;

use crate::http::{detect_local_ip, SubtitleServer};
use crate::pipeline::{Outcome, SubtitlePipeline};
use crate::subtitle::webvtt::{srt_to_vtt, ConversionMode};
use crate::tests::fixtures::{launch_context, FakeTool, TestVideo, SAMPLE_SRT};
use crate::types::{HostMode, TrackSubtype, TrackType};

/// Fetch from the listener over loopback, whatever address it advertises
async fn fetch(server: &SubtitleServer) -> reqwest::Response {
    let url = format!("http://127.0.0.1:{}/", server.local_addr().port());
    reqwest::get(url).await.unwrap()
}

async fn shutdown(outcome: Outcome) {
    if let Outcome::Attached(server) = outcome {
        server.shutdown().await;
    }
}

#[tokio::test]
async fn test_sibling_srt_end_to_end() {
    let video = TestVideo::new("a.mp4").with_sibling_srt(SAMPLE_SRT);
    let mut ctx = launch_context(&video, HostMode::Launch);
    let pipeline = SubtitlePipeline::new(FakeTool::with_subtitle_stream(), video.config());

    let outcome = pipeline.attach_subtitles(&mut ctx).await.unwrap();
    let server = outcome.server().unwrap();
    let address = format!("http://127.0.0.1:{}", server.local_addr().port());

    assert_eq!(ctx.options.subtitles.as_deref(), Some(address.as_str()));
    let item = &ctx.options.playlist[0];
    let media = item.media.as_ref().unwrap();
    let tracks = media.tracks.as_ref().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].track_content_id, address);
    assert_eq!(tracks[0].track_content_type, "text/vtt");
    assert_eq!(tracks[0].kind, TrackType::Text);
    assert_eq!(tracks[0].subtype, TrackSubtype::Subtitles);
    assert_eq!(item.active_track_ids, Some(vec![1]));
    assert!(media.text_track_style.is_some());

    let expected = srt_to_vtt(SAMPLE_SRT.as_bytes(), ConversionMode::Full).unwrap();
    let response = fetch(server).await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/vtt;charset=utf-8"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        response.headers()[header::CONTENT_LENGTH],
        expected.len().to_string().as_str()
    );
    assert_eq!(response.bytes().await.unwrap(), expected);

    shutdown(outcome).await;
}

#[tokio::test]
async fn test_detected_address_is_advertised() {
    let video = TestVideo::new("a.mp4").with_sibling_srt(SAMPLE_SRT);
    let mut ctx = launch_context(&video, HostMode::Launch);
    ctx.options.myip = None;
    let pipeline = SubtitlePipeline::new(FakeTool::without_subtitle_stream(), video.config());

    let outcome = pipeline.attach_subtitles(&mut ctx).await.unwrap();
    let port = outcome.server().unwrap().local_addr().port();
    let expected = format!("http://{}:{}", detect_local_ip().await, port);
    assert_eq!(ctx.options.subtitles.as_deref(), Some(expected.as_str()));

    shutdown(outcome).await;
}

#[tokio::test]
async fn test_embedded_stream_end_to_end() {
    let video = TestVideo::new("a.mkv");
    let config = video.config();
    let mut ctx = launch_context(&video, HostMode::Launch);
    let pipeline = SubtitlePipeline::new(FakeTool::with_subtitle_stream(), config.clone());

    let outcome = pipeline.attach_subtitles(&mut ctx).await.unwrap();
    assert!(outcome.is_attached());
    assert!(config.extraction_path().exists());

    let body = fetch(outcome.server().unwrap()).await.bytes().await.unwrap();
    assert!(body.starts_with(b"WEBVTT"));
    assert!(std::str::from_utf8(&body)
        .unwrap()
        .contains("00:00:04.000 --> 00:00:06.250"));

    shutdown(outcome).await;
}

#[tokio::test]
async fn test_bypass_encoding_serves_raw_wrapper() {
    let srt = "1\n00:00:01,000 --> 00:00:02,000\ncaf\u{e9}\n";
    let video = TestVideo::new("a.mp4").with_sibling_srt(srt);
    let mut ctx = launch_context(&video, HostMode::Launch);
    ctx.options.bypass_srt_encoding = true;
    let pipeline = SubtitlePipeline::new(FakeTool::without_subtitle_stream(), video.config());

    let outcome = pipeline.attach_subtitles(&mut ctx).await.unwrap();
    let body = fetch(outcome.server().unwrap()).await.bytes().await.unwrap();
    assert_eq!(
        &body[..],
        "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\ncaf\u{e9}\n".as_bytes()
    );

    shutdown(outcome).await;
}

#[tokio::test]
async fn test_remote_vtt_is_passed_through() {
    let vtt = Bytes::from_static(b"WEBVTT\n\nNOTE upstream\n\n00:01.000 --> 00:02.000\nHi\n");
    let upstream = SubtitleServer::bind(vtt.clone(), 0, Some("127.0.0.1"))
        .await
        .unwrap();

    let video = TestVideo::new("a.mp4").with_sibling_srt(SAMPLE_SRT);
    let mut ctx = launch_context(&video, HostMode::Launch);
    ctx.options.subtitles = Some(format!("{}/subs/movie.vtt", upstream.address()));
    let pipeline = SubtitlePipeline::new(FakeTool::with_subtitle_stream(), video.config());

    let outcome = pipeline.attach_subtitles(&mut ctx).await.unwrap();
    let body = fetch(outcome.server().unwrap()).await.bytes().await.unwrap();
    assert_eq!(body, vtt);
    assert_eq!(pipeline.tool().probe_calls(), 0);

    shutdown(outcome).await;
    upstream.shutdown().await;
}

#[tokio::test]
async fn test_remote_srt_is_converted() {
    let srt = Bytes::from_static(SAMPLE_SRT.as_bytes());
    let upstream = SubtitleServer::bind(srt, 0, Some("127.0.0.1")).await.unwrap();

    let video = TestVideo::new("a.mp4");
    let mut ctx = launch_context(&video, HostMode::Launch);
    ctx.options.subtitles = Some(format!("{}/movie.srt?lang=en", upstream.address()));
    let pipeline = SubtitlePipeline::new(FakeTool::without_subtitle_stream(), video.config());

    let outcome = pipeline.attach_subtitles(&mut ctx).await.unwrap();
    let body = fetch(outcome.server().unwrap()).await.bytes().await.unwrap();
    assert_eq!(
        body,
        srt_to_vtt(SAMPLE_SRT.as_bytes(), ConversionMode::Full).unwrap()
    );

    shutdown(outcome).await;
    upstream.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_requests_get_identical_bytes() {
    let video = TestVideo::new("a.mp4").with_sibling_srt(SAMPLE_SRT);
    let mut ctx = launch_context(&video, HostMode::Launch);
    let pipeline = SubtitlePipeline::new(FakeTool::without_subtitle_stream(), video.config());
    let outcome = pipeline.attach_subtitles(&mut ctx).await.unwrap();
    let url = format!(
        "http://127.0.0.1:{}/any/path",
        outcome.server().unwrap().local_addr().port()
    );

    let requests: Vec<_> = (0..8)
        .map(|_| {
            let url = url.clone();
            tokio::spawn(async move { reqwest::get(url).await.unwrap().bytes().await.unwrap() })
        })
        .collect();
    let mut bodies = Vec::new();
    for request in requests {
        bodies.push(request.await.unwrap());
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));

    shutdown(outcome).await;
}
