//! REST request helper
//!
//! Every API wrapper funnels through `perform` + `decode`: marshal the body,
//! send it with the bot's bearer token under a fixed deadline, and hand back
//! the raw body or a typed error.

use std::time::Duration;

use guilded_common::ClientConfig;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{HttpError, HttpResult};

/// Authenticated REST client
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    bearer: String,
    base_url: String,
    timeout: Duration,
}

impl RestClient {
    /// Create a REST client from the shared configuration
    pub fn new(config: &ClientConfig) -> HttpResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| HttpError::Request(e.to_string()))?;

        Ok(Self {
            http,
            bearer: config.bearer(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
        })
    }

    /// Override the per-call deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join a path such as `/channels/abc` onto the API base URL
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one request and return the raw response body
    ///
    /// Any 2xx status yields the body; any other status is parsed into
    /// [`HttpError::Api`]. Pass `None::<&()>` for requests without a body.
    pub async fn perform<B>(&self, method: Method, url: &str, body: Option<&B>) -> HttpResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(HttpError::Serialize)?;

        let mut request = self
            .http
            .request(method.clone(), url)
            .timeout(self.timeout)
            .header(AUTHORIZATION, &self.bearer)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(payload) = payload {
            request = request.body(payload);
        }

        tracing::debug!(method = %method, url = %url, "Performing request");

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            let err = HttpError::from_api_body(status.as_u16(), &bytes);
            tracing::debug!(method = %method, url = %url, error = %err, "Request failed");
            Err(err)
        }
    }

    /// Decode a raw response body into the target shape
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> HttpResult<T> {
        serde_json::from_slice(body).map_err(HttpError::Decode)
    }

    /// `perform` followed by `decode`
    pub async fn request<T, B>(&self, method: Method, url: &str, body: Option<&B>) -> HttpResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self.perform(method, url, body).await?;
        self.decode(&raw)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
