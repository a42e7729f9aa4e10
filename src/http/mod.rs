//! HTTP client module
//!
//! Thin wrapper over `reqwest` shared by the remote store.
//!
//! # Features
//!
//! - **Base URL joining**: paths are resolved against the store endpoint
//! - **Default headers**: credentials and content negotiation on every call
//! - **Status classification**: non-2xx responses become `Error::HttpStatus`
//!
//! Requests are sent once. A failed call is returned to the caller as-is.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
