//! Subtitle listener lifecycle and address discovery

use axum::body::Bytes;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::routes::create_router;
use crate::config::SubtitleConfig;
use crate::error::{Result, SubtitleError};
use crate::types::PlaybackOptions;

/// Detect the primary local (non-loopback) IPv4 address.
///
/// Connects a UDP socket to a public IP (no data sent) to learn which
/// interface the OS would route through. Falls back to loopback.
pub async fn detect_local_ip() -> IpAddr {
    async fn route_probe() -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
        socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80)).await?;
        Ok(socket.local_addr()?.ip())
    }

    match route_probe().await {
        Ok(ip) => ip,
        Err(e) => {
            tracing::debug!("local address detection failed: {}", e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

/// A running subtitle listener.
///
/// Dropping the handle leaves the listener running for the rest of the
/// process; call [`SubtitleServer::shutdown`] to stop it.
#[derive(Debug)]
pub struct SubtitleServer {
    address: String,
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SubtitleServer {
    /// Bind `0.0.0.0:<port>` and start serving `content` in the background.
    ///
    /// Port 0 picks an ephemeral port; the advertised address always uses
    /// the port actually bound.
    pub async fn bind(content: Bytes, port: u16, advertised_ip: Option<&str>) -> Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
            .await
            .map_err(|source| SubtitleError::Bind { port, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| SubtitleError::Bind { port, source })?;

        let ip = match advertised_ip {
            Some(ip) => ip.to_string(),
            None => detect_local_ip().await.to_string(),
        };
        let address = format!("http://{}:{}", ip, local_addr.port());

        let (shutdown, rx) = oneshot::channel::<()>();
        let app = create_router(content);
        let task = tokio::spawn(async move {
            let signal = async move {
                // A dropped handle is not a shutdown request
                if rx.await.is_err() {
                    std::future::pending::<()>().await;
                }
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
            {
                tracing::error!("subtitle server error: {}", e);
            }
        });

        tracing::info!(
            "started webserver on address {} using port {}",
            ip,
            local_addr.port()
        );

        Ok(Self {
            address,
            local_addr,
            shutdown,
            task,
        })
    }

    /// Address the playback device should fetch subtitles from
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Socket the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for the listener task to end
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            tracing::warn!("subtitle server task ended abnormally: {}", e);
        }
    }
}

/// Serve `content` on the launch's subtitle port
pub async fn serve(
    content: Bytes,
    options: &PlaybackOptions,
    config: &SubtitleConfig,
) -> Result<SubtitleServer> {
    let port = options.subtitle_port.unwrap_or(config.default_port);
    SubtitleServer::bind(content, port, options.myip.as_deref()).await
}
