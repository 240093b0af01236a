//! Gateway event types
//!
//! The closed set of event tags this client understands, and the typed
//! [`Event`] each one decodes into. Tags are the payload struct names, exactly
//! as they appear in the envelope's `t` field.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

use super::payloads;

/// Event whose tag has no registered shape
///
/// Still dispatched so catch-all and raw-tag listeners can see it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownEvent {
    pub tag: String,
    pub payload: Value,
}

/// Decode a payload, falling back to the shape's empty value
fn decode_or_default<T: DeserializeOwned + Default>(tag: &str, payload: &str) -> T {
    serde_json::from_str(payload).unwrap_or_else(|e| {
        tracing::warn!(tag = %tag, error = %e, "Event payload did not match its shape");
        T::default()
    })
}

macro_rules! event_table {
    ($($kind:ident),* $(,)?) => {
        /// Gateway event types
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EventKind {
            $($kind,)*
            /// Any tag not in the table
            Unknown,
        }

        impl EventKind {
            /// Every known kind, in table order
            pub const ALL: &'static [EventKind] = &[$(EventKind::$kind),*];

            /// Get the wire tag of the event type
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$kind => stringify!($kind),)*
                    Self::Unknown => "Unknown",
                }
            }

            /// Parse an event type from a wire tag
            #[must_use]
            pub fn from_str(s: &str) -> Option<Self> {
                match s {
                    $(stringify!($kind) => Some(Self::$kind),)*
                    _ => None,
                }
            }

            /// Decode a raw payload into this kind's event
            ///
            /// `tag` is kept for `Unknown` events and for logging.
            #[must_use]
            pub fn decode(self, tag: &str, payload: &str) -> Event {
                match self {
                    $(Self::$kind => Event::$kind(decode_or_default(tag, payload)),)*
                    Self::Unknown => Event::Unknown(UnknownEvent {
                        tag: tag.to_string(),
                        payload: serde_json::from_str(payload).unwrap_or(Value::Null),
                    }),
                }
            }
        }

        /// A decoded gateway event
        #[derive(Debug, Clone, PartialEq)]
        pub enum Event {
            $($kind(payloads::$kind),)*
            Unknown(UnknownEvent),
        }

        impl Event {
            #[must_use]
            pub fn kind(&self) -> EventKind {
                match self {
                    $(Self::$kind(_) => EventKind::$kind,)*
                    Self::Unknown(_) => EventKind::Unknown,
                }
            }

            /// Wire tag this event arrived with
            #[must_use]
            pub fn tag(&self) -> &str {
                match self {
                    Self::Unknown(unknown) => &unknown.tag,
                    other => other.kind().as_str(),
                }
            }
        }
    };
}

event_table! {
    BotServerMembershipCreated,
    BotServerMembershipDeleted,
    ChatMessageCreated,
    ChatMessageUpdated,
    ChatMessageDeleted,
    ServerMemberJoined,
    ServerMemberRemoved,
    ServerMemberBanned,
    ServerMemberUnbanned,
    ServerMemberUpdated,
    ServerRolesUpdated,
    ServerChannelCreated,
    ServerChannelUpdated,
    ServerChannelDeleted,
    ServerMemberSocialLinkCreated,
    ServerMemberSocialLinkUpdated,
    ServerMemberSocialLinkDeleted,
    ServerWebhookCreated,
    ServerWebhookUpdated,
    ChannelArchived,
    ChannelRestored,
    DocCreated,
    DocUpdated,
    DocDeleted,
    CalendarEventCreated,
    CalendarEventUpdated,
    CalendarEventDeleted,
    CalendarEventRsvpUpdated,
    CalendarEventRsvpManyUpdated,
    CalendarEventRsvpDeleted,
    ForumTopicCreated,
    ForumTopicUpdated,
    ForumTopicDeleted,
    ForumTopicPinned,
    ForumTopicUnpinned,
    ForumTopicLocked,
    ForumTopicUnlocked,
    ForumTopicReactionCreated,
    ForumTopicReactionDeleted,
    ForumTopicCommentCreated,
    ForumTopicCommentUpdated,
    ForumTopicCommentDeleted,
}

impl Event {
    /// The chat message carried by message create/update events
    #[must_use]
    pub fn chat_message(&self) -> Option<&guilded_core::ChatMessage> {
        match self {
            Self::ChatMessageCreated(e) => Some(&e.message),
            Self::ChatMessageUpdated(e) => Some(&e.message),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<EventKind> for String {
    fn from(event: EventKind) -> Self {
        event.as_str().to_string()
    }
}
