//! Connection state

use std::fmt;

/// Lifecycle state of a gateway client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Never opened, or the last open attempt failed
    #[default]
    Idle,
    /// Dialing and waiting for the welcome frame
    Connecting,
    /// Heartbeat and read loop running
    Open,
    /// `close()` in progress
    Closing,
    /// Closed by `close()`
    Closed,
    /// The read loop ended on its own; call `open()` to reconnect
    Disconnected,
}

impl ConnectionState {
    /// Check if a session is live or being established
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Connecting | Self::Open)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
