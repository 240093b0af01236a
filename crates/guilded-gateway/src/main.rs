//! Ping bot
//!
//! Answers `!ping` with `pong` in the same channel.
//!
//! Run with:
//! ```bash
//! GUILDED_TOKEN=... GUILDED_SERVER_ID=... cargo run -p guilded-gateway
//! ```
//!
//! Configuration is loaded from environment variables (or a `.env` file).

use anyhow::Context;
use guilded_common::{try_init_tracing, ClientConfig, TracingConfig};
use guilded_gateway::GatewayClient;
use guilded_http::{Method, RestClient};
use serde_json::json;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing(&TracingConfig::default()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "Ping bot failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    info!(server_id = %config.server_id, "Starting ping bot");

    let rest = RestClient::new(&config).context("Failed to build REST client")?;
    let client = GatewayClient::new(config);

    client.command("!ping", move |_, created| {
        let rest = rest.clone();
        let channel_id = created.message.channel_id.clone();

        tokio::spawn(async move {
            let url = rest.endpoint(&format!("/channels/{channel_id}/messages"));
            let body = json!({ "content": "pong" });
            match rest.perform(Method::POST, &url, Some(&body)).await {
                Ok(_) => info!(channel_id = %channel_id, "Replied to ping"),
                Err(e) => warn!(channel_id = %channel_id, error = %e, "Failed to reply to ping"),
            }
        });
    });

    client.open().await.context("Failed to open gateway")?;
    info!("Listening for commands, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    client.close().await;
    Ok(())
}
