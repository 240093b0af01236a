//! User models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User kind; absent on the wire means a regular user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Bot,
    #[default]
    User,
}

/// Full user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl User {
    #[inline]
    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.user_type == UserType::Bot
    }
}

/// Custom status shown on a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub emote_id: i64,
}

/// Abbreviated user, as embedded in member lists and bans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
