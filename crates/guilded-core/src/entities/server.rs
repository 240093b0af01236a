//! Server model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server kind chosen by its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    Team,
    Organization,
    Community,
    Clan,
    Guild,
    Friends,
    Streaming,
    #[default]
    #[serde(other)]
    Other,
}

/// Server (a "guild" on other platforms)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Server {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub server_type: Option<ServerType>,
    pub name: String,
    /// Vanity URL slug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub is_verified: bool,
    /// First chat or voice channel in the sidebar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_channel_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
