//! REST error types

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// REST helper error type
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request body could not be serialized
    #[error("Failed to marshal request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The request could not be built (bad URL, bad header value)
    #[error("Failed to create request: {0}")]
    Request(String),

    /// The overall deadline for the call elapsed
    #[error("Request timed out")]
    Timeout,

    /// Connection-level failure
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}, {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        meta: Option<Value>,
    },

    /// The response body did not match the expected shape
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl HttpError {
    /// Check if this error is the deadline error
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// HTTP status for API errors
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an API error from a non-success response body
    ///
    /// The platform answers with `{code, message, meta}`; a body that is not
    /// in that shape still produces an error with an empty code.
    pub(crate) fn from_api_body(status: u16, body: &[u8]) -> Self {
        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct ApiErrorBody {
            code: String,
            message: String,
            meta: Option<Value>,
        }

        let parsed: ApiErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = if parsed.message.is_empty() {
            "no message".to_string()
        } else {
            parsed.message
        };

        Self::Api {
            status,
            code: parsed.code,
            message,
            meta: parsed.meta,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

/// REST result type
pub type HttpResult<T> = Result<T, HttpError>;
