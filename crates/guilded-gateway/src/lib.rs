//! # guilded-gateway
//!
//! Realtime gateway client for Guilded bots.
//!
//! ```no_run
//! use guilded_common::ClientConfig;
//! use guilded_gateway::{EventKind, GatewayClient};
//!
//! # async fn run() -> Result<(), guilded_gateway::GatewayError> {
//! let client = GatewayClient::new(ClientConfig::new("token", "server-id"));
//!
//! client.on(EventKind::ServerMemberJoined, |_, event| {
//!     tracing::info!(tag = %event.tag(), "member joined");
//! });
//! client.command("!ping", |_, created| {
//!     tracing::info!(channel_id = %created.message.channel_id, "ping");
//! });
//!
//! client.open().await?;
//! // ...
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod events;
pub mod listeners;
pub mod protocol;

pub use connection::{ConnectionState, GatewayClient};
pub use error::{GatewayError, GatewayResult};
pub use events::{Event, EventKind, EventRegistry, UnknownEvent};
pub use listeners::{Command, Commands};
