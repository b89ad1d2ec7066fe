//! Tably MCP (Model Context Protocol) Server
//!
//! This crate exposes the Tably reservation engine to AI agents over MCP.
//! Five tools cover the full booking flow: restaurant search, availability
//! checks, placing and cancelling reservations, and listing a guest's
//! bookings.
//!
//! ## Architecture
//!
//! - `ReservationServer`: MCP handler dispatching tool calls to a
//!   [`tably_core::ReservationProvider`]
//! - `transport`: stdio and streamable-HTTP serving
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use tably_core::MockProvider;
//! use tably_mcp::ReservationServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(MockProvider::new()?);
//!     let server = ReservationServer::new(provider);
//!     server.run_stdio().await
//! }
//! ```

mod server;
mod transport;

pub use server::{
    CancelReservationParams, CheckAvailabilityParams, ListReservationsParams,
    PlaceReservationParams, ReservationServer, SearchRestaurantsParams,
};
pub use transport::mcp_router;
