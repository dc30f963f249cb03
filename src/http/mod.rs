//! HTTP client module
//!
//! Provides the shared HTTP client used for every page request.
//!
//! # Features
//!
//! - **Shared Pool**: One connection pool per run, released when the client drops
//! - **Connection Cap**: Bounded number of simultaneous in-flight requests
//! - **Form POST**: Form-encoded bodies with JSON responses

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};

#[cfg(test)]
mod tests;
