//! # guilded-common
//!
//! Shared utilities: client configuration and tracing setup.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{ClientConfig, ConfigError, DEFAULT_API_URL, DEFAULT_GATEWAY_URL};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
