//! Guilded REST helper
//!
//! Shared request plumbing for API wrappers: authenticated calls with a
//! deadline, typed errors, and JSON decoding.

pub mod client;
pub mod error;

pub use client::RestClient;
pub use error::{HttpError, HttpResult};
pub use reqwest::Method;
