//! Test helpers for integration tests
//!
//! Provides an in-process mock gateway that plays a scripted session for
//! every client that connects, and records what the clients send back.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use guilded_common::ClientConfig;
use guilded_gateway::GatewayClient;
use parking_lot::Mutex;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;

use crate::fixtures::{TEST_SERVER_ID, TEST_TOKEN};

/// What the mock sends to each connection
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// First frame after the upgrade
    pub welcome: Option<String>,
    /// Frames sent right after the welcome
    pub frames: Vec<String>,
    /// Close the connection once the frames are sent
    pub hang_up: bool,
}

#[derive(Default)]
struct Recorded {
    connections: AtomicUsize,
    close_frames: AtomicUsize,
    auth_headers: Mutex<Vec<String>>,
    text_frames: Mutex<Vec<String>>,
}

/// Mock gateway server
pub struct MockGateway {
    pub addr: SocketAddr,
    recorded: Arc<Recorded>,
    _handle: JoinHandle<()>,
}

impl MockGateway {
    /// Start a mock that plays `script` for every connection
    pub async fn start(script: Script) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let recorded = Arc::new(Recorded::default());

        let state = Arc::clone(&recorded);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = Arc::clone(&state);
                let script = script.clone();
                tokio::spawn(async move {
                    if let Err(e) = serve_connection(stream, script, state).await {
                        tracing::debug!(error = %e, "Mock connection ended with error");
                    }
                });
            }
        });

        Ok(Self {
            addr,
            recorded,
            _handle: handle,
        })
    }

    /// Start a mock that only sends a welcome
    pub async fn with_welcome(welcome: String) -> Result<Self> {
        Self::start(Script {
            welcome: Some(welcome),
            ..Script::default()
        })
        .await
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Client configuration pointed at this mock
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(TEST_TOKEN, TEST_SERVER_ID)
            .with_gateway_url(self.url())
            .with_close_grace_period(Duration::from_millis(50))
            .with_request_timeout(Duration::from_secs(2))
    }

    /// Gateway client pointed at this mock
    pub fn client(&self) -> GatewayClient {
        GatewayClient::new(self.client_config())
    }

    /// Number of websocket upgrades accepted
    pub fn connections(&self) -> usize {
        self.recorded.connections.load(Ordering::SeqCst)
    }

    /// Number of close frames received from clients
    pub fn close_frames(&self) -> usize {
        self.recorded.close_frames.load(Ordering::SeqCst)
    }

    /// `Authorization` header of each upgrade request
    pub fn auth_headers(&self) -> Vec<String> {
        self.recorded.auth_headers.lock().clone()
    }

    /// Text frames received from clients
    pub fn text_frames(&self) -> Vec<String> {
        self.recorded.text_frames.lock().clone()
    }

    /// Number of empty text frames (heartbeats) received
    pub fn heartbeats(&self) -> usize {
        self.recorded
            .text_frames
            .lock()
            .iter()
            .filter(|frame| frame.is_empty())
            .count()
    }
}

async fn serve_connection(stream: TcpStream, script: Script, recorded: Arc<Recorded>) -> Result<()> {
    let headers = Arc::clone(&recorded);
    let callback = move |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
        let auth = request
            .headers()
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        headers.auth_headers.lock().push(auth);
        Ok(response)
    };

    let mut ws = tokio_tungstenite::accept_hdr_async(stream, callback).await?;
    recorded.connections.fetch_add(1, Ordering::SeqCst);

    for frame in script.welcome.iter().chain(script.frames.iter()) {
        ws.send(Message::Text(frame.clone())).await?;
    }

    if script.hang_up {
        ws.close(None).await?;
        return Ok(());
    }

    while let Some(message) = ws.next().await {
        match message? {
            Message::Text(text) => recorded.text_frames.lock().push(text),
            Message::Close(_) => {
                recorded.close_frames.fetch_add(1, Ordering::SeqCst);
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Poll `condition` until it holds or `timeout` elapses
pub async fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Default wait used by the tests
pub const WAIT: Duration = Duration::from_secs(3);
