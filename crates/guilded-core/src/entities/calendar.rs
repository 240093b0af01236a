//! Calendar event and RSVP models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Mentions;

/// Event in a calendar channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub id: i64,
    pub server_id: String,
    pub group_id: String,
    pub channel_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    pub repeats: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role_ids: Vec<i64>,
    pub rsvp_disabled: bool,
    pub is_all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp_limit: Option<u32>,
    pub auto_fill_waitlist: bool,
    pub starts_at: Option<DateTime<Utc>>,
    /// Length of the event in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub is_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Mentions>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation: Option<CalendarEventCancellation>,
}

impl CalendarEvent {
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEventCancellation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// RSVP answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RsvpStatus {
    Going,
    Maybe,
    Declined,
    #[default]
    Invited,
    Waitlisted,
    NotGoing,
}

/// A user's RSVP to a calendar event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEventRsvp {
    pub calendar_event_id: i64,
    pub channel_id: String,
    pub server_id: String,
    pub user_id: String,
    pub status: RsvpStatus,
    pub created_by: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
