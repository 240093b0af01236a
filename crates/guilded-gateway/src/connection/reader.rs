//! Read loop task
//!
//! Pulls frames off the socket one at a time and hands each text frame to the
//! client for decoding and dispatch. Each read races the shutdown signal, so
//! `close()` never waits on the transport.

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

use super::manager::WeakClient;
use super::session::WsSource;
use crate::error::GatewayError;

/// Why the loop stopped
#[derive(Debug)]
enum Exit {
    Shutdown,
    ClientDropped,
    ClosedByServer,
    StreamEnded,
    Failed(GatewayError),
}

pub(crate) async fn run(
    session_id: Uuid,
    client: WeakClient,
    mut source: WsSource,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::debug!(session_id = %session_id, "Read loop started");

    let exit = loop {
        let next = tokio::select! {
            biased;
            _ = shutdown.changed() => break Exit::Shutdown,
            next = source.next() => next,
        };

        let text = match next {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    tracing::debug!(session_id = %session_id, "Skipping non-UTF-8 binary frame");
                    continue;
                }
            },
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
            Some(Ok(Message::Close(frame))) => {
                tracing::info!(session_id = %session_id, frame = ?frame, "Gateway closed the connection");
                break Exit::ClosedByServer;
            }
            Some(Err(e)) => break Exit::Failed(GatewayError::Read(e)),
            None => break Exit::StreamEnded,
        };

        let Some(handle) = client.upgrade() else {
            break Exit::ClientDropped;
        };
        handle.handle_frame(&text);
    };

    match exit {
        Exit::Shutdown | Exit::ClientDropped => {
            tracing::debug!(session_id = %session_id, reason = ?exit, "Read loop stopped");
        }
        Exit::Failed(ref e) => {
            tracing::warn!(session_id = %session_id, error = %e, "Read loop ended");
            if let Some(handle) = client.upgrade() {
                handle.read_loop_ended(session_id);
            }
        }
        Exit::ClosedByServer | Exit::StreamEnded => {
            tracing::info!(session_id = %session_id, reason = ?exit, "Read loop ended");
            if let Some(handle) = client.upgrade() {
                handle.read_loop_ended(session_id);
            }
        }
    }
}
