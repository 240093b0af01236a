//! Gateway client
//!
//! Owns the one live connection, drives the open/close lifecycle, and routes
//! decoded events to the listener registry.

use std::sync::{Arc, Weak};
use std::time::Duration;

use futures_util::StreamExt;
use guilded_common::ClientConfig;
use parking_lot::RwLock;
use tokio::sync::{watch, Mutex};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{header::AUTHORIZATION, HeaderValue};
use tokio_tungstenite::tungstenite::{self, Message};
use uuid::Uuid;

use super::session::{Session, WsStream};
use super::{heartbeat, reader, ConnectionState};
use crate::error::{GatewayError, GatewayResult};
use crate::events::payloads::ChatMessageCreated;
use crate::events::{Event, EventKind, EventRegistry};
use crate::listeners::{Command, Commands, ListenerRegistry};
use crate::protocol::{Envelope, ErrorPayload, HelloPayload, OpCode};

/// Handle to a gateway connection
///
/// Cheap to clone; all clones share the same connection and listeners.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    events: EventRegistry,
    listeners: ListenerRegistry,
    /// Serializes `open()` and `close()`
    session: Mutex<Option<Session>>,
    state: watch::Sender<ConnectionState>,
    heartbeat_interval: RwLock<Option<Duration>>,
    last_message_id: RwLock<Option<String>>,
}

/// Non-owning handle held by the read loop
pub(crate) struct WeakClient(Weak<Inner>);

impl WeakClient {
    pub(crate) fn upgrade(&self) -> Option<GatewayClient> {
        self.0.upgrade().map(|inner| GatewayClient { inner })
    }
}

impl GatewayClient {
    /// Create a client that understands every known event type
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_registry(config, EventRegistry::new())
    }

    /// Create a client with a custom event registry
    #[must_use]
    pub fn with_registry(config: ClientConfig, events: EventRegistry) -> Self {
        let (state, _) = watch::channel(ConnectionState::Idle);
        Self {
            inner: Arc::new(Inner {
                config,
                events,
                listeners: ListenerRegistry::new(),
                session: Mutex::new(None),
                state,
                heartbeat_interval: RwLock::new(None),
                last_message_id: RwLock::new(None),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.inner.listeners
    }

    // === Lifecycle ===

    /// Connect, handshake, and start the heartbeat and read loop
    ///
    /// Does nothing if a session is already open or connecting. After the
    /// read loop has died (`Disconnected`) the stale session is torn down and
    /// a fresh one dialed. On error the client is left `Idle` and `open()`
    /// may be called again.
    pub async fn open(&self) -> GatewayResult<()> {
        let mut session = self.inner.session.lock().await;

        if self.state().is_live() {
            tracing::debug!(state = %self.state(), "Gateway already open");
            return Ok(());
        }

        if let Some(stale) = session.take() {
            tracing::info!(session_id = %stale.id, "Discarding stale session before reconnecting");
            stale.teardown(Duration::ZERO).await;
        }

        self.set_state(ConnectionState::Connecting);
        let session_id = Session::generate_id();

        let (stream, hello) = match self.connect(session_id).await {
            Ok(connected) => connected,
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to open gateway");
                self.set_state(ConnectionState::Idle);
                return Err(e);
            }
        };

        let period = hello.heartbeat_interval();
        *self.inner.heartbeat_interval.write() = Some(period);
        if let Some(id) = hello.last_message_id {
            *self.inner.last_message_id.write() = Some(id);
        }

        let (sink, source) = stream.split();
        let sink = Arc::new(Mutex::new(sink));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // Open before the reader runs, so a dead reader can flip it to Disconnected.
        self.set_state(ConnectionState::Open);

        let heartbeat = tokio::spawn(heartbeat::run(
            session_id,
            Arc::clone(&sink),
            period,
            shutdown_rx.clone(),
        ));
        let reader = tokio::spawn(reader::run(session_id, self.downgrade(), source, shutdown_rx));

        *session = Some(Session {
            id: session_id,
            sink,
            shutdown: Some(shutdown_tx),
            heartbeat,
            reader,
        });

        tracing::info!(
            session_id = %session_id,
            heartbeat_interval_ms = period.as_millis() as u64,
            "Gateway open"
        );

        Ok(())
    }

    /// Stop the background tasks and close the connection
    ///
    /// Safe to call at any time, any number of times.
    pub async fn close(&self) {
        let mut session = self.inner.session.lock().await;

        let Some(live) = session.take() else {
            tracing::debug!(state = %self.state(), "Gateway not open, nothing to close");
            return;
        };

        self.set_state(ConnectionState::Closing);
        tracing::info!(session_id = %live.id, "Closing gateway");

        live.teardown(self.inner.config.close_grace_period()).await;

        self.set_state(ConnectionState::Closed);
        tracing::info!("Gateway closed");
    }

    async fn connect(&self, session_id: Uuid) -> GatewayResult<(WsStream, HelloPayload)> {
        let mut stream = self.dial(session_id).await?;

        match self.handshake(&mut stream).await {
            Ok(hello) => Ok((stream, hello)),
            Err(e) => {
                if let Err(close_err) = stream.close(None).await {
                    tracing::debug!(error = %close_err, "Failed to close socket after handshake");
                }
                Err(e)
            }
        }
    }

    async fn dial(&self, session_id: Uuid) -> GatewayResult<WsStream> {
        let url = &self.inner.config.gateway_url;
        let dial_err = |source| GatewayError::Dial {
            url: url.clone(),
            source,
        };

        let mut request = url.as_str().into_client_request().map_err(dial_err)?;
        let bearer = HeaderValue::from_str(&self.inner.config.bearer())
            .map_err(|e| dial_err(tungstenite::Error::HttpFormat(e.into())))?;
        request.headers_mut().insert(AUTHORIZATION, bearer);

        tracing::debug!(session_id = %session_id, url = %url, "Dialing gateway");

        let (stream, response) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(dial_err)?;

        tracing::debug!(
            session_id = %session_id,
            status = %response.status(),
            "Gateway upgrade accepted"
        );

        Ok(stream)
    }

    /// Read the welcome frame
    ///
    /// Bounded by the request timeout so a silent server cannot stall `open()`.
    async fn handshake(&self, stream: &mut WsStream) -> GatewayResult<HelloPayload> {
        let mismatch = |reason: String| GatewayError::HandshakeMismatch(reason);
        let deadline = self.inner.config.request_timeout();

        let frame = match tokio::time::timeout(deadline, stream.next()).await {
            Err(_) => return Err(mismatch(format!("no welcome within {}ms", deadline.as_millis()))),
            Ok(None) => return Err(mismatch("connection closed before welcome".to_string())),
            Ok(Some(Err(e))) => return Err(mismatch(format!("failed to read welcome: {e}"))),
            Ok(Some(Ok(Message::Text(text)))) => text,
            Ok(Some(Ok(Message::Binary(bytes)))) => String::from_utf8(bytes)
                .map_err(|_| mismatch("welcome frame is not UTF-8".to_string()))?,
            Ok(Some(Ok(other))) => return Err(mismatch(format!("expected welcome, got {other:?}"))),
        };

        let envelope = Envelope::parse(&frame).map_err(|e| mismatch(e.to_string()))?;
        if envelope.op != OpCode::Welcome {
            return Err(mismatch(format!("expected op 1, got op {}", envelope.op.as_u8())));
        }

        let hello: HelloPayload = envelope
            .decode_payload()
            .map_err(|e| mismatch(format!("invalid welcome payload: {e}")))?;
        if !hello.is_usable() {
            return Err(mismatch("heartbeat interval must be positive".to_string()));
        }

        Ok(hello)
    }

    // === Frame pipeline ===

    /// Normalize, parse, resolve, decode, and dispatch one frame
    pub(crate) fn handle_frame(&self, frame: &str) {
        let envelope = match Envelope::parse(frame) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping frame");
                return;
            }
        };

        if let Some(id) = &envelope.s {
            *self.inner.last_message_id.write() = Some(id.clone());
        }

        match envelope.op {
            OpCode::Event => {
                let Some(tag) = envelope.tag() else {
                    tracing::warn!("Skipping event frame without a tag");
                    return;
                };
                let event = self.inner.events.decode(tag, envelope.payload());
                self.inner.listeners.dispatch(self, &event);
            }
            OpCode::Error => {
                let payload: ErrorPayload = envelope.decode_payload().unwrap_or_default();
                tracing::warn!(message = %payload.message, "Gateway reported an error");
            }
            other => tracing::debug!(op = %other, "Ignoring non-event frame"),
        }
    }

    /// Called by a read loop that stopped without being asked to
    pub(crate) fn read_loop_ended(&self, session_id: Uuid) {
        let changed = self.inner.state.send_if_modified(|state| {
            if *state == ConnectionState::Open {
                *state = ConnectionState::Disconnected;
                true
            } else {
                false
            }
        });
        if changed {
            tracing::warn!(session_id = %session_id, "Gateway disconnected; call open() to reconnect");
        }
    }

    // === Listeners ===

    /// Listen for one event kind
    pub fn on<F>(&self, kind: EventKind, listener: F)
    where
        F: Fn(&GatewayClient, &Event) + Send + Sync + 'static,
    {
        self.on_tag(kind.as_str(), listener);
    }

    /// Listen for a raw wire tag, including tags this client does not know
    pub fn on_tag<F>(&self, tag: impl Into<String>, listener: F)
    where
        F: Fn(&GatewayClient, &Event) + Send + Sync + 'static,
    {
        self.inner.listeners.register(tag, Arc::new(listener));
    }

    /// Listen for every event
    pub fn on_any<F>(&self, listener: F)
    where
        F: Fn(&GatewayClient, &Event) + Send + Sync + 'static,
    {
        self.inner.listeners.register_any(Arc::new(listener));
    }

    /// Run `action` for chat messages whose content is exactly `text`
    pub fn command<F>(&self, text: impl Into<String>, action: F)
    where
        F: Fn(&GatewayClient, &ChatMessageCreated) + Send + Sync + 'static,
    {
        self.add_command(Command::new(text, action));
    }

    /// Register a batch of commands in order
    pub fn add_commands(&self, commands: Commands) {
        for command in commands {
            self.add_command(command);
        }
    }

    fn add_command(&self, command: Command) {
        self.on(EventKind::ChatMessageCreated, move |client, event| {
            if let Event::ChatMessageCreated(created) = event {
                if command.matches(&created.message.content) {
                    (command.action)(client, created);
                }
            }
        });
    }

    // === Status ===

    pub fn state(&self) -> ConnectionState {
        *self.inner.state.borrow()
    }

    /// Subscribe to state changes
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    /// Interval negotiated by the last successful handshake
    pub fn heartbeat_interval(&self) -> Option<Duration> {
        *self.inner.heartbeat_interval.read()
    }

    /// ID of the most recent message seen on the stream
    pub fn last_message_id(&self) -> Option<String> {
        self.inner.last_message_id.read().clone()
    }

    fn set_state(&self, next: ConnectionState) {
        let previous = self.inner.state.send_replace(next);
        if previous != next {
            tracing::debug!(from = %previous, to = %next, "Connection state changed");
        }
    }

    fn downgrade(&self) -> WeakClient {
        WeakClient(Arc::downgrade(&self.inner))
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("gateway_url", &self.inner.config.gateway_url)
            .field("state", &self.state())
            .field("listeners", &self.inner.listeners)
            .finish()
    }
}
