//! Domain models - the objects carried inside gateway event payloads

mod calendar;
mod channel;
mod doc;
mod forum;
mod member;
mod message;
mod server;
mod user;
mod webhook;

pub use calendar::{CalendarEvent, CalendarEventCancellation, CalendarEventRsvp, RsvpStatus};
pub use channel::{ChannelType, ServerChannel, Visibility};
pub use doc::Doc;
pub use forum::{Emote, ForumTopic, ForumTopicComment, ForumTopicReaction};
pub use member::{MemberRoleIds, MemberUserInfo, ServerMember, ServerMemberBan};
pub use message::{
    ChatEmbed, ChatMessage, DeletedChatMessage, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia,
    MentionedChannel, MentionedRole, MentionedUser, Mentions, MessageType,
};
pub use server::{Server, ServerType};
pub use user::{User, UserStatus, UserSummary, UserType};
pub use webhook::{SocialLink, Webhook};
