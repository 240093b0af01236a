//! # guilded-core
//!
//! Domain models for the Guilded API: messages, channels, members, servers,
//! webhooks, docs, calendar events, and forum topics.
//!
//! Every model defaults all of its fields, so partial or evolving payloads
//! still deserialize.

pub mod entities;

// Re-export commonly used types at crate root
pub use entities::*;
