//! Gateway envelope format
//!
//! Every frame on the socket is one JSON envelope. The payload is kept as raw
//! JSON until the event tag has been resolved to a shape.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

use super::OpCode;
use crate::error::{GatewayError, GatewayResult};

/// Gateway envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Operation code
    pub op: OpCode,

    /// Event tag (only for op=0)
    #[serde(default)]
    pub t: Option<String>,

    /// Message ID of this event, usable for resuming
    #[serde(default)]
    pub s: Option<String>,

    /// Undecoded payload
    #[serde(default)]
    pub d: Option<Box<RawValue>>,
}

/// Flatten a raw frame onto one line and trim it
#[must_use]
pub fn normalize(frame: &str) -> String {
    frame.replace('\n', " ").trim().to_string()
}

impl Envelope {
    /// Normalize and parse one text frame
    pub fn parse(frame: &str) -> GatewayResult<Self> {
        serde_json::from_str(&normalize(frame)).map_err(GatewayError::MalformedFrame)
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.t.as_deref()
    }

    /// Raw payload text, `null` when absent
    #[must_use]
    pub fn payload(&self) -> &str {
        self.d.as_deref().map_or("null", RawValue::get)
    }

    /// Decode the payload into a concrete shape
    pub fn decode_payload<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(self.payload())
    }
}

impl std::fmt::Display for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.t {
            Some(t) => write!(f, "Envelope(op={}, t={t})", self.op),
            None => write!(f, "Envelope(op={})", self.op),
        }
    }
}
