//! Live session handle
//!
//! Everything one open connection owns: the shared write half, the two
//! background tasks, and the sender side of their shutdown signal.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use uuid::Uuid;

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsSource = SplitStream<WsStream>;

/// Write half shared by the heartbeat task and `close()`
pub(crate) type SharedSink = Arc<Mutex<SplitSink<WsStream, Message>>>;

pub(crate) struct Session {
    pub(crate) id: Uuid,
    pub(crate) sink: SharedSink,
    /// Taken on teardown so the signal fires once
    pub(crate) shutdown: Option<watch::Sender<bool>>,
    pub(crate) heartbeat: JoinHandle<()>,
    pub(crate) reader: JoinHandle<()>,
}

impl Session {
    /// Generate a new session ID
    #[must_use]
    pub(crate) fn generate_id() -> Uuid {
        Uuid::new_v4()
    }

    /// Stop both tasks and close the socket
    ///
    /// Sends a normal close frame, waits `grace` so the server can see it,
    /// then closes the write half and joins the tasks.
    pub(crate) async fn teardown(mut self, grace: Duration) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send_replace(true);
        }

        let close = Message::Close(Some(CloseFrame {
            code: CloseCode::Normal,
            reason: Cow::Borrowed(""),
        }));
        if let Err(e) = self.sink.lock().await.send(close).await {
            tracing::debug!(session_id = %self.id, error = %e, "Failed to send close frame");
        }

        if !grace.is_zero() {
            tokio::time::sleep(grace).await;
        }

        if let Err(e) = self.sink.lock().await.close().await {
            tracing::debug!(session_id = %self.id, error = %e, "Failed to close socket");
        }

        for (name, task) in [("heartbeat", self.heartbeat), ("reader", self.reader)] {
            if let Err(e) = task.await {
                tracing::warn!(session_id = %self.id, task = name, error = %e, "Session task ended abnormally");
            }
        }

        tracing::debug!(session_id = %self.id, "Session torn down");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("heartbeat_finished", &self.heartbeat.is_finished())
            .field("reader_finished", &self.reader.is_finished())
            .finish()
    }
}
