//! Transport layer for the reservation server.
//!
//! Supports stdio for direct agent wiring and streamable HTTP for network
//! deployment, selected through the server configuration.

use std::sync::Arc;

use axum::Router;
use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio::io::{stdin, stdout};
use tracing::info;

use crate::server::ReservationServer;

/// Build an axum router serving the MCP protocol at its root path.
pub fn mcp_router(server: ReservationServer) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );

    Router::new().fallback_service(service)
}

impl ReservationServer {
    /// Run the server over stdio until the peer disconnects.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        info!(
            event_name = "system.transport.stdio_ready",
            correlation_id = "bootstrap",
            "serving stdio transport"
        );

        let service = self.serve((stdin(), stdout())).await?;
        let _quit = service.waiting().await?;
        Ok(())
    }

    /// Run the server over streamable HTTP on the given address until
    /// interrupted.
    pub async fn run_http(self, bind_address: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(bind_address).await?;
        info!(
            event_name = "system.transport.http_listening",
            correlation_id = "bootstrap",
            bind_address = %bind_address,
            "serving streamable-http transport"
        );

        axum::serve(listener, mcp_router(self))
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
