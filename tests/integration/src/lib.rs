//! Integration test utilities for the gateway client
//!
//! This crate provides an in-process mock gateway and frame builders for
//! end-to-end tests of the connection lifecycle.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
