//! Server member, ban, and role-assignment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{User, UserSummary};

/// Member of a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerMember {
    pub user: User,
    pub role_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub is_owner: bool,
}

impl ServerMember {
    /// Name shown in the member list: nickname if set, otherwise the user name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.user.name)
    }

    /// Check if the member holds a role
    #[inline]
    #[must_use]
    pub fn has_role(&self, role_id: i64) -> bool {
        self.role_ids.contains(&role_id)
    }
}

/// Ban record for a server member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerMemberBan {
    pub user: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// ID of the user who created the ban
    pub created_by: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Nickname change carried by member update events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberUserInfo {
    pub id: String,
    /// `None` means the nickname was removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// Full set of role IDs held by one member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberRoleIds {
    pub user_id: String,
    pub role_ids: Vec<i64>,
}
