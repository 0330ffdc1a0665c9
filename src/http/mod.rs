//! Credential client module
//!
//! Fetches database credentials from the token service over HTTP.
//!
//! # Features
//!
//! - **URL Templates**: Request URL rendered per lookup from a compiled template
//! - **Pluggable Auth**: Injector resolved by scheme name at construction
//! - **Timeouts**: Separate connect timeout and per-call read deadline
//! - **Single Attempt**: No retries; every failure is returned to the caller

mod client;

pub use client::{ClientConfig, ClientConfigBuilder, CredentialClient, DEFAULT_TIMEOUT};
