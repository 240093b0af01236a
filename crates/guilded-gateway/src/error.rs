//! Gateway error types

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Gateway client error type
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The websocket could not be established
    #[error("Failed to dial gateway at {url}: {source}")]
    Dial {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    /// The first frame after dialing was not a usable welcome
    #[error("Handshake mismatch: {0}")]
    HandshakeMismatch(String),

    /// A frame could not be parsed as an envelope
    #[error("Malformed frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    /// A tag with no registered shape
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    /// Writing to the socket failed
    #[error("Failed to send frame: {0}")]
    Send(#[source] tungstenite::Error),

    /// Reading from the socket failed
    #[error("Failed to read frame: {0}")]
    Read(#[source] tungstenite::Error),
}

impl GatewayError {
    /// Check if the caller may simply call `open()` again
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Dial { .. } | Self::HandshakeMismatch(_))
    }
}

/// Gateway result type
pub type GatewayResult<T> = Result<T, GatewayError>;
