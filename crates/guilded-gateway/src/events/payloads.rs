//! Event payload definitions
//!
//! One struct per event tag. Every field defaults, so a partial payload still
//! decodes.

use chrono::{DateTime, Utc};
use guilded_core::{
    CalendarEvent, CalendarEventRsvp, ChatMessage, DeletedChatMessage, Doc, ForumTopic,
    ForumTopicComment, ForumTopicReaction, MemberRoleIds, MemberUserInfo, Server, ServerChannel,
    ServerMember, ServerMemberBan, SocialLink, Webhook,
};
use serde::{Deserialize, Serialize};

/// Declares payloads shaped as `{ serverId, <field> }`
macro_rules! server_event {
    ($($(#[$meta:meta])* $name:ident { $field:ident: $ty:ty })*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            #[serde(rename_all = "camelCase", default)]
            pub struct $name {
                pub server_id: String,
                pub $field: $ty,
            }
        )*
    };
}

// === Bot membership ===

/// Bot was added to a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotServerMembershipCreated {
    pub server: Server,
    /// ID of the user who added the bot
    pub created_by: String,
}

/// Bot was removed from a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotServerMembershipDeleted {
    pub server: Server,
    pub deleted_by: String,
}

// === Chat messages ===

server_event! {
    /// New chat message
    ChatMessageCreated { message: ChatMessage }
    /// Chat message edited
    ChatMessageUpdated { message: ChatMessage }
}

/// Chat message deleted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMessageDeleted {
    pub server_id: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub message: DeletedChatMessage,
}

// === Members ===

/// User joined a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerMemberJoined {
    pub server_id: String,
    pub member: ServerMember,
    /// Member count after the join
    pub server_member_count: u32,
}

/// User left, was kicked, or was banned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerMemberRemoved {
    pub server_id: String,
    pub user_id: String,
    pub is_kick: bool,
    pub is_ban: bool,
}

server_event! {
    ServerMemberUpdated { user_info: MemberUserInfo }
    /// Role assignments changed for one or more members
    ServerRolesUpdated { member_role_ids: Vec<MemberRoleIds> }
}

/// Member banned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerMemberBanned {
    pub server_id: String,
    #[serde(rename = "serverMemberBan")]
    pub ban: ServerMemberBan,
}

/// Member unbanned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerMemberUnbanned {
    pub server_id: String,
    #[serde(rename = "serverMemberBan")]
    pub ban: ServerMemberBan,
}

server_event! {
    ServerMemberSocialLinkCreated { social_link: SocialLink }
    ServerMemberSocialLinkUpdated { social_link: SocialLink }
    ServerMemberSocialLinkDeleted { social_link: SocialLink }
}

// === Channels and webhooks ===

server_event! {
    ServerChannelCreated { channel: ServerChannel }
    ServerChannelUpdated { channel: ServerChannel }
    ServerChannelDeleted { channel: ServerChannel }
    ChannelArchived { channel: ServerChannel }
    ChannelRestored { channel: ServerChannel }
    ServerWebhookCreated { webhook: Webhook }
    ServerWebhookUpdated { webhook: Webhook }
}

// === Docs ===

server_event! {
    DocCreated { doc: Doc }
    DocUpdated { doc: Doc }
    DocDeleted { doc: Doc }
}

// === Calendar ===

server_event! {
    CalendarEventCreated { calendar_event: CalendarEvent }
    CalendarEventUpdated { calendar_event: CalendarEvent }
    CalendarEventDeleted { calendar_event: CalendarEvent }
    CalendarEventRsvpUpdated { calendar_event_rsvp: CalendarEventRsvp }
    /// Several RSVPs changed at once, e.g. a bulk invite
    CalendarEventRsvpManyUpdated { calendar_event_rsvps: Vec<CalendarEventRsvp> }
    CalendarEventRsvpDeleted { calendar_event_rsvp: CalendarEventRsvp }
}

// === Forums ===

server_event! {
    ForumTopicCreated { forum_topic: ForumTopic }
    ForumTopicUpdated { forum_topic: ForumTopic }
    ForumTopicDeleted { forum_topic: ForumTopic }
    ForumTopicPinned { forum_topic: ForumTopic }
    ForumTopicUnpinned { forum_topic: ForumTopic }
    ForumTopicLocked { forum_topic: ForumTopic }
    ForumTopicUnlocked { forum_topic: ForumTopic }
    ForumTopicReactionCreated { reaction: ForumTopicReaction }
    ForumTopicReactionDeleted { reaction: ForumTopicReaction }
    ForumTopicCommentCreated { forum_topic_comment: ForumTopicComment }
    ForumTopicCommentUpdated { forum_topic_comment: ForumTopicComment }
    ForumTopicCommentDeleted { forum_topic_comment: ForumTopicComment }
}
