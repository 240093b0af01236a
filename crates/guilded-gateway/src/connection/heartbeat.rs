//! Heartbeat task
//!
//! Keeps the socket alive by writing an empty text frame once per negotiated
//! interval. The first ping goes out one full interval after the session opens.

use std::time::Duration;

use futures_util::SinkExt;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::{self, Message};
use uuid::Uuid;

use super::session::SharedSink;
use crate::error::GatewayError;

/// Run until the shutdown signal fires or its sender is dropped
pub(crate) async fn run(
    session_id: Uuid,
    sink: SharedSink,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut consecutive_failures: u32 = 0;

    tracing::debug!(
        session_id = %session_id,
        interval_ms = period.as_millis() as u64,
        "Heartbeat started"
    );

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                let result = sink.lock().await.send(Message::Text(String::new())).await;
                record_send(session_id, &mut consecutive_failures, result);
            }
        }
    }

    tracing::debug!(session_id = %session_id, "Heartbeat stopped");
}

/// Track one send result; failures are logged and never stop the task
fn record_send(session_id: Uuid, consecutive_failures: &mut u32, result: Result<(), tungstenite::Error>) {
    match result {
        Ok(()) => {
            if *consecutive_failures > 0 {
                tracing::info!(
                    session_id = %session_id,
                    after_failures = *consecutive_failures,
                    "Heartbeat recovered"
                );
            }
            *consecutive_failures = 0;
            tracing::trace!(session_id = %session_id, "Heartbeat sent");
        }
        Err(e) => {
            *consecutive_failures = consecutive_failures.saturating_add(1);
            tracing::warn!(
                session_id = %session_id,
                consecutive_failures = *consecutive_failures,
                error = %GatewayError::Send(e),
                "Heartbeat failed"
            );
        }
    }
}
