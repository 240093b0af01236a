//! Gateway operation codes

use serde::{Deserialize, Deserializer};

/// Gateway operation codes
///
/// Carried in the `op` field of every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Event dispatch; `t` holds the event tag
    Event = 0,
    /// Sent once right after connect with the heartbeat interval
    Welcome = 1,
    /// Replay of missed events after a resume
    Resume = 2,
    /// Server-side error report
    Error = 8,
    /// Server ping
    Ping = 9,
    /// Server pong
    Pong = 10,
}

impl OpCode {
    /// Create an `OpCode` from a raw integer value
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Event),
            1 => Some(Self::Welcome),
            2 => Some(Self::Resume),
            8 => Some(Self::Error),
            9 => Some(Self::Ping),
            10 => Some(Self::Pong),
            _ => None,
        }
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get the name of this op code
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Event => "Event",
            Self::Welcome => "Welcome",
            Self::Resume => "Resume",
            Self::Error => "Error",
            Self::Ping => "Ping",
            Self::Pong => "Pong",
        }
    }
}

impl<'de> Deserialize<'de> for OpCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value).ok_or_else(|| serde::de::Error::custom(format!("invalid op code: {value}")))
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u8())
    }
}
