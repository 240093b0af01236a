//! Test fixtures and frame builders
//!
//! Provides the raw gateway frames used by integration tests.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique message IDs
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Token every test client dials with
pub const TEST_TOKEN: &str = "test-bot-token";

/// Server ID every test client is configured for
pub const TEST_SERVER_ID: &str = "wlVr3Ggl";

/// Welcome frame (op 1) with the given heartbeat interval
pub fn welcome_frame(heartbeat_interval_ms: u64) -> String {
    json!({"op": 1, "d": {"heartbeatIntervalMs": heartbeat_interval_ms}}).to_string()
}

/// Welcome frame carrying a resume position
pub fn welcome_frame_with_last_message(heartbeat_interval_ms: u64, last_message_id: &str) -> String {
    json!({
        "op": 1,
        "d": {
            "heartbeatIntervalMs": heartbeat_interval_ms,
            "lastMessageId": last_message_id,
            "botId": "bot-id",
            "user": {"id": "bot-user", "type": "bot", "name": "Test Bot"}
        }
    })
    .to_string()
}

/// Event frame (op 0) with a fresh message ID
pub fn event_frame(tag: &str, data: Value) -> String {
    json!({"op": 0, "t": tag, "s": format!("msg-{}", unique_suffix()), "d": data}).to_string()
}

/// `ChatMessageCreated` event with the given content
pub fn chat_message_frame(content: &str) -> String {
    event_frame(
        "ChatMessageCreated",
        json!({
            "serverId": TEST_SERVER_ID,
            "message": {
                "id": format!("00000000-0000-0000-0000-{:012}", unique_suffix()),
                "type": "default",
                "serverId": TEST_SERVER_ID,
                "channelId": "channel-1",
                "content": content,
                "createdAt": "2022-06-16T00:00:00.000Z",
                "createdBy": "Ann6LewA"
            }
        }),
    )
}

/// `ServerMemberJoined` event for a user
pub fn member_joined_frame(user_id: &str, name: &str) -> String {
    event_frame(
        "ServerMemberJoined",
        json!({
            "serverId": TEST_SERVER_ID,
            "member": {
                "user": {"id": user_id, "type": "user", "name": name},
                "roleIds": [],
                "joinedAt": "2022-06-16T00:00:00.000Z"
            },
            "serverMemberCount": 42
        }),
    )
}
