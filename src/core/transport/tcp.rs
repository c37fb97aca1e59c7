//! TCP transport implementation.
//!
//! Line-delimited JSON-RPC over raw sockets. Every connection gets its own
//! MCP session, but all sessions share one library and one view.

use rmcp::ServiceExt;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed accept before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections until the task is dropped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
                    }
                    tokio::spawn(serve_connection(server.clone(), stream, peer));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}

#[instrument(skip(server, stream))]
async fn serve_connection(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    let service = match server.serve(stream).await {
        Ok(service) => service,
        Err(e) => {
            warn!("Handshake failed: {}", e);
            return;
        }
    };
    info!("Client connected");

    match service.waiting().await {
        Ok(reason) => debug!("Client disconnected: {:?}", reason),
        Err(e) => warn!("Session ended with error: {}", e),
    }
}
