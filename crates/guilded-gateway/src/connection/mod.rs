//! Connection management
//!
//! The gateway client, its per-connection session, and the two background
//! tasks each session runs.

mod heartbeat;
mod manager;
mod reader;
mod session;
mod state;

pub use manager::GatewayClient;
pub use state::ConnectionState;
