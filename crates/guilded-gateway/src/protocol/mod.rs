//! Gateway protocol definitions
//!
//! Op codes, the envelope format, and protocol-level payloads.

mod envelope;
mod opcodes;
mod payloads;

pub use envelope::{normalize, Envelope};
pub use opcodes::OpCode;
pub use payloads::{ErrorPayload, HelloPayload};
