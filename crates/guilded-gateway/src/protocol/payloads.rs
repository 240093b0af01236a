//! Protocol payload definitions

use std::time::Duration;

use guilded_core::User;
use serde::{Deserialize, Serialize};

/// Payload for op 1 (Welcome)
///
/// Sent by the server immediately after connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval_ms: u64,

    /// Last message ID seen on this bot's stream, for resuming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,

    /// The bot's own user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl HelloPayload {
    /// Create a welcome payload with the given interval
    #[must_use]
    pub fn with_interval(heartbeat_interval_ms: u64) -> Self {
        Self {
            heartbeat_interval_ms,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_last_message_id(mut self, id: impl Into<String>) -> Self {
        self.last_message_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    /// A zero interval cannot drive a heartbeat
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.heartbeat_interval_ms > 0
    }
}

/// Payload for op 8 (Error)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPayload {
    pub message: String,
}
