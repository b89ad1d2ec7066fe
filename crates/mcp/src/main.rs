//! Tably MCP Server Binary
//!
//! This is the entry point for running the Tably reservation MCP server.
//!
//! ## Usage
//!
//! ```bash
//! # Run with defaults (streamable HTTP on 0.0.0.0:8000, mock provider)
//! tably-mcp
//!
//! # Run over stdio for direct agent wiring
//! TABLY_SERVER_TRANSPORT=stdio tably-mcp
//!
//! # Run on a different port with JSON logs
//! TABLY_SERVER_PORT=9000 TABLY_LOG_FORMAT=json tably-mcp
//! ```
//!
//! Configuration is read from `tably.toml` when present, then overridden by
//! `TABLY_*` environment variables.

use std::sync::Arc;

use anyhow::Result;
use tably_core::config::{AppConfig, LoadOptions, ProviderBackend, Transport};
use tably_core::{MockProvider, ReservationProvider};
use tably_mcp::ReservationServer;

// Diagnostics go to stderr so the stdio transport keeps stdout for the
// protocol stream.
fn init_logging(config: &AppConfig) {
    use tably_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let provider: Arc<dyn ReservationProvider> = match config.provider.backend {
        ProviderBackend::Mock => Arc::new(MockProvider::new()?),
    };

    tracing::info!(
        event_name = "system.provider.initialized",
        correlation_id = "bootstrap",
        backend = "mock",
        "reservation provider initialized"
    );

    let server = ReservationServer::new(provider);

    match config.server.transport {
        Transport::Stdio => {
            tracing::info!(
                event_name = "system.mcp.started",
                correlation_id = "bootstrap",
                transport = "stdio",
                "tably-mcp started"
            );
            server.run_stdio().await?;
        }
        Transport::StreamableHttp => {
            let bind_address = config.server.bind_address();
            tracing::info!(
                event_name = "system.mcp.started",
                correlation_id = "bootstrap",
                transport = "streamable-http",
                bind_address = %bind_address,
                "tably-mcp started"
            );
            server.run_http(&bind_address).await?;
        }
    }

    tracing::info!(
        event_name = "system.mcp.stopping",
        correlation_id = "shutdown",
        "tably-mcp stopping"
    );

    Ok(())
}
