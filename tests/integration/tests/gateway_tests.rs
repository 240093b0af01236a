//! Gateway Integration Tests
//!
//! Every test runs the client against an in-process mock gateway; no network
//! access or credentials are needed.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use guilded_gateway::{ConnectionState, Event, EventKind, GatewayClient, GatewayError};
use integration_tests::{fixtures::*, wait_for, MockGateway, Script, WAIT};
use parking_lot::Mutex;
use serde_json::json;

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    (Arc::clone(&hits), hits)
}

// ============================================================================
// Handshake and dispatch
// ============================================================================

#[tokio::test]
async fn test_ping_command_end_to_end() {
    let mock = MockGateway::start(Script {
        welcome: Some(welcome_frame(30_000)),
        frames: vec![chat_message_frame("ping")],
        hang_up: false,
    })
    .await
    .unwrap();

    let client = mock.client();
    let (hits, seen) = counter();
    client.command("ping", move |_, created| {
        assert_eq!(created.server_id, TEST_SERVER_ID);
        hits.fetch_add(1, Ordering::SeqCst);
    });

    client.open().await.unwrap();
    assert_eq!(client.state(), ConnectionState::Open);
    assert_eq!(client.heartbeat_interval(), Some(Duration::from_millis(30_000)));

    assert!(wait_for(WAIT, || seen.load(Ordering::SeqCst) == 1).await);

    client.close().await;
    assert_eq!(client.state(), ConnectionState::Closed);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bearer_token_sent_on_dial() {
    let mock = MockGateway::with_welcome(welcome_frame(30_000)).await.unwrap();
    let client = mock.client();

    client.open().await.unwrap();
    client.close().await;

    assert_eq!(mock.auth_headers(), [format!("Bearer {TEST_TOKEN}")]);
}

#[tokio::test]
async fn test_welcome_last_message_id() {
    let mock = MockGateway::with_welcome(welcome_frame_with_last_message(30_000, "resume-from-here"))
        .await
        .unwrap();
    let client = mock.client();

    client.open().await.unwrap();
    assert_eq!(client.last_message_id().as_deref(), Some("resume-from-here"));
    client.close().await;
}

#[tokio::test]
async fn test_events_dispatched_in_arrival_order() {
    let mock = MockGateway::start(Script {
        welcome: Some(welcome_frame(30_000)),
        frames: vec![
            member_joined_frame("u1", "First"),
            event_frame("ListItemCreated", json!({"listItem": {"id": "li"}})),
            chat_message_frame("hello"),
            event_frame("DocDeleted", json!({"serverId": TEST_SERVER_ID, "doc": {"id": 7}})),
        ],
        hang_up: false,
    })
    .await
    .unwrap();

    let client = mock.client();
    let tags = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&tags);
    client.on_any(move |_, event| recorder.lock().push(event.tag().to_string()));

    let names = Arc::new(Mutex::new(Vec::new()));
    let joined = Arc::clone(&names);
    client.on(EventKind::ServerMemberJoined, move |_, event| {
        if let Event::ServerMemberJoined(e) = event {
            joined.lock().push(e.member.user.name.clone());
        }
    });

    client.open().await.unwrap();
    assert!(wait_for(WAIT, || tags.lock().len() == 4).await);
    client.close().await;

    assert_eq!(
        *tags.lock(),
        ["ServerMemberJoined", "ListItemCreated", "ChatMessageCreated", "DocDeleted"]
    );
    assert_eq!(*names.lock(), ["First"]);
}

#[tokio::test]
async fn test_malformed_frames_are_skipped() {
    let mock = MockGateway::start(Script {
        welcome: Some(welcome_frame(30_000)),
        frames: vec![
            "this is not json".to_string(),
            r#"{"op":0,"t":"DocCreated","d":"#.to_string(),
            event_frame("DocCreated", json!({"serverId": TEST_SERVER_ID})),
        ],
        hang_up: false,
    })
    .await
    .unwrap();

    let client = mock.client();
    let (hits, seen) = counter();
    client.on(EventKind::DocCreated, move |_, _| {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    client.open().await.unwrap();
    assert!(wait_for(WAIT, || seen.load(Ordering::SeqCst) == 1).await);
    assert_eq!(client.state(), ConnectionState::Open);
    client.close().await;
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_open_twice_single_connection() {
    let mock = MockGateway::with_welcome(welcome_frame(30_000)).await.unwrap();
    let client = mock.client();

    client.open().await.unwrap();
    client.open().await.unwrap();

    let other = client.clone();
    let (a, b) = tokio::join!(client.open(), other.open());
    a.unwrap();
    b.unwrap();

    assert_eq!(mock.connections(), 1);
    client.close().await;
}

#[tokio::test]
async fn test_concurrent_first_open_dials_once() {
    let mock = MockGateway::with_welcome(welcome_frame(30_000)).await.unwrap();
    let client = mock.client();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.open().await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(mock.connections(), 1);
    client.close().await;
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let mock = MockGateway::with_welcome(welcome_frame(30_000)).await.unwrap();
    let client = mock.client();

    client.open().await.unwrap();
    client.close().await;
    client.close().await;

    assert_eq!(client.state(), ConnectionState::Closed);
    assert!(wait_for(WAIT, || mock.close_frames() == 1).await);
}

#[tokio::test]
async fn test_reopen_after_close() {
    let mock = MockGateway::with_welcome(welcome_frame(30_000)).await.unwrap();
    let client = mock.client();

    client.open().await.unwrap();
    client.close().await;
    client.open().await.unwrap();

    assert_eq!(client.state(), ConnectionState::Open);
    assert_eq!(mock.connections(), 2);
    client.close().await;
}

#[tokio::test]
async fn test_heartbeat_sends_empty_frames() {
    let mock = MockGateway::with_welcome(welcome_frame(50)).await.unwrap();
    let client = mock.client();

    client.open().await.unwrap();
    assert!(wait_for(WAIT, || mock.heartbeats() >= 3).await);
    client.close().await;

    assert!(mock.text_frames().iter().all(String::is_empty));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_handshake_mismatch_leaves_idle() {
    let mock = MockGateway::with_welcome(event_frame("DocCreated", json!({}))).await.unwrap();
    let client = mock.client();

    let err = client.open().await.unwrap_err();
    assert!(matches!(err, GatewayError::HandshakeMismatch(_)), "{err:?}");
    assert_eq!(client.state(), ConnectionState::Idle);
    assert_eq!(client.heartbeat_interval(), None);

    // Retrying dials again
    let err = client.open().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(mock.connections(), 2);
}

#[tokio::test]
async fn test_zero_heartbeat_interval_rejected() {
    let mock = MockGateway::with_welcome(welcome_frame(0)).await.unwrap();
    let client = mock.client();

    let err = client.open().await.unwrap_err();
    assert!(matches!(err, GatewayError::HandshakeMismatch(_)), "{err:?}");
    assert_eq!(client.state(), ConnectionState::Idle);
}

#[tokio::test]
async fn test_silent_server_times_out_handshake() {
    let mock = MockGateway::start(Script::default()).await.unwrap();
    let client = GatewayClient::new(mock.client_config().with_request_timeout(Duration::from_secs(1)));

    let err = client.open().await.unwrap_err();
    assert!(matches!(err, GatewayError::HandshakeMismatch(_)), "{err:?}");
    assert_eq!(client.state(), ConnectionState::Idle);
}

#[tokio::test]
async fn test_unsupported_url_is_dial_error() {
    let config = guilded_common::ClientConfig::new(TEST_TOKEN, TEST_SERVER_ID)
        .with_gateway_url("http://127.0.0.1:1/websocket");
    let client = GatewayClient::new(config);

    let err = client.open().await.unwrap_err();
    assert!(matches!(err, GatewayError::Dial { .. }), "{err:?}");
    assert_eq!(client.state(), ConnectionState::Idle);
}

#[tokio::test]
async fn test_server_hang_up_then_reconnect() {
    let mock = MockGateway::start(Script {
        welcome: Some(welcome_frame(30_000)),
        frames: vec![event_frame("DocCreated", json!({"serverId": TEST_SERVER_ID}))],
        hang_up: true,
    })
    .await
    .unwrap();

    let client = mock.client();
    let (hits, seen) = counter();
    client.on(EventKind::DocCreated, move |_, _| {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    let mut states = client.watch_state();
    client.open().await.unwrap();
    states
        .wait_for(|state| *state == ConnectionState::Disconnected)
        .await
        .unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    // Listeners survive the reconnect
    client.open().await.unwrap();
    assert_eq!(mock.connections(), 2);
    assert!(wait_for(WAIT, || seen.load(Ordering::SeqCst) == 2).await);

    client.close().await;
    assert_eq!(client.state(), ConnectionState::Closed);
}
