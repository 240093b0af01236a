//! Server channel model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel type
///
/// Determines which content routes apply to a channel (a `chat` channel takes
/// chat messages, a `docs` channel takes docs, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Announcements,
    #[default]
    Chat,
    Calendar,
    Forums,
    Media,
    Docs,
    Voice,
    List,
    Scheduling,
    Stream,
    /// A channel type this library does not know about yet
    #[serde(other)]
    Unknown,
}

impl ChannelType {
    /// Get the wire name of the channel type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Announcements => "announcements",
            Self::Chat => "chat",
            Self::Calendar => "calendar",
            Self::Forums => "forums",
            Self::Media => "media",
            Self::Docs => "docs",
            Self::Voice => "voice",
            Self::List => "list",
            Self::Scheduling => "scheduling",
            Self::Stream => "stream",
            Self::Unknown => "unknown",
        }
    }

    /// Whether threads can be created under this channel type
    #[must_use]
    pub const fn supports_threads(self) -> bool {
        matches!(self, Self::Chat | Self::Voice | Self::Stream)
    }
}

/// Who can access a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Accessible to everyone, even those who aren't in the server
    Public,
    /// Only accessible to explicitly mentioned users
    Private,
}

/// Server channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerChannel {
    pub id: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub server_id: String,
    /// Root channel or thread in the hierarchy; present only for threads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
    /// Immediate parent channel or thread; present only for threads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Message the thread was created off of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl ServerChannel {
    /// Check if this channel is a thread
    #[inline]
    #[must_use]
    pub fn is_thread(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if this channel is archived
    #[inline]
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}
