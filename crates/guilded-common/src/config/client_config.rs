//! Client configuration
//!
//! Loads configuration from environment variables or builds it in code.

use std::env;
use std::fmt;
use std::time::Duration;

/// Default gateway endpoint
pub const DEFAULT_GATEWAY_URL: &str = "wss://www.guilded.gg/websocket/v1";

/// Default REST API base URL
pub const DEFAULT_API_URL: &str = "https://www.guilded.gg/api/v1";

/// Configuration shared by the gateway client and the REST helper
#[derive(Clone)]
pub struct ClientConfig {
    /// Bot access token, sent as `Authorization: Bearer <token>`
    pub token: String,
    /// Server the bot operates in
    pub server_id: String,
    pub gateway_url: String,
    pub api_base_url: String,
    /// How long `close()` waits after sending the close frame
    pub close_grace_period_ms: u64,
    /// Overall deadline for one REST call
    pub request_timeout_ms: u64,
}

// Default value functions
fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_close_grace_period_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl ClientConfig {
    /// Create a configuration from the two required values
    #[must_use]
    pub fn new(token: impl Into<String>, server_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            server_id: server_id.into(),
            gateway_url: default_gateway_url(),
            api_base_url: default_api_url(),
            close_grace_period_ms: default_close_grace_period_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }

    #[must_use]
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_close_grace_period(mut self, grace: Duration) -> Self {
        self.close_grace_period_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn close_grace_period(&self) -> Duration {
        Duration::from_millis(self.close_grace_period_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Value of the `Authorization` header
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first if one is present.
    ///
    /// # Errors
    /// Returns an error if `GUILDED_TOKEN` or `GUILDED_SERVER_ID` is missing,
    /// or a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("GUILDED_TOKEN").ok_or(ConfigError::MissingVar("GUILDED_TOKEN"))?;
        let server_id =
            lookup("GUILDED_SERVER_ID").ok_or(ConfigError::MissingVar("GUILDED_SERVER_ID"))?;

        let parse_u64 = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw)),
                None => Ok(default),
            }
        };

        Ok(Self {
            token,
            server_id,
            gateway_url: lookup("GUILDED_GATEWAY_URL").unwrap_or_else(default_gateway_url),
            api_base_url: lookup("GUILDED_API_URL").unwrap_or_else(default_api_url),
            close_grace_period_ms: parse_u64(
                "GUILDED_CLOSE_GRACE_MS",
                default_close_grace_period_ms(),
            )?,
            request_timeout_ms: parse_u64(
                "GUILDED_REQUEST_TIMEOUT_MS",
                default_request_timeout_ms(),
            )?,
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("server_id", &self.server_id)
            .field("gateway_url", &self.gateway_url)
            .field("api_base_url", &self.api_base_url)
            .field("close_grace_period_ms", &self.close_grace_period_ms)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
