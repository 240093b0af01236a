//! Forum topic, comment, and reaction models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Mentions;

/// Topic in a forum channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForumTopic {
    pub id: i64,
    pub server_id: String,
    pub group_id: String,
    pub channel_id: String,
    pub title: String,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_webhook_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Last time the topic was bumped by a comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bumped_at: Option<DateTime<Utc>>,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Mentions>,
}

/// Comment on a forum topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForumTopicComment {
    pub id: i64,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub channel_id: String,
    pub forum_topic_id: i64,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Mentions>,
}

/// Emote reaction on a forum topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForumTopicReaction {
    pub channel_id: String,
    pub forum_topic_id: i64,
    pub created_by: String,
    pub emote: Emote,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Emote {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
}
