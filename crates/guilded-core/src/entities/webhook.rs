//! Webhook and social link models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel webhook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Webhook {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub server_id: String,
    pub channel_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Only returned to the webhook's creator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Webhook {
    #[inline]
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// External account linked to a member profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLink {
    /// Service name, e.g. `twitch` or `steam`
    #[serde(rename = "type")]
    pub link_type: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
