//! # db-credentials
//!
//! A small client for fetching short-lived database credentials from a
//! token-exchange service.
//!
//! Callers supply a database name, a requesting username, and an opaque
//! token. The client renders these into a request URL, performs one
//! authenticated HTTP GET, and returns the credential pair from the JSON
//! response.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use db_credentials::{ClientConfig, CredentialClient, UrlTemplate, Result};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let template = UrlTemplate::parse(
//!         "https://tokens.internal/db/{{ db_name }}?user={{ username }}&token={{ token }}",
//!     )?;
//!     let config = ClientConfig::builder(template)
//!         .read_timeout(Duration::from_secs(5))
//!         .connect_timeout(Duration::from_secs(2))
//!         .build();
//!
//!     let client = CredentialClient::new(config)?;
//!     let credential = client.get_credentials("orders", "alice", "opaque-token").await?;
//!     println!("{}", credential.username);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     CredentialClient                       │
//! │  get_credentials(db_name, username, token) → Credential    │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────────────┬────────┴───────────┬───────────────────┐
//! │     Template      │        Auth        │       HTTP        │
//! ├───────────────────┼────────────────────┼───────────────────┤
//! │ {{ db_name }}     │ scheme registry    │ connect timeout   │
//! │ {{ username }}    │ NONE (built in)    │ read deadline     │
//! │ {{ token }}       │ custom injectors   │ 2xx → credential  │
//! └───────────────────┴────────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Wire types and template parameters
pub mod types;

/// Auth injector trait and scheme registry
pub mod auth;

/// Credential client
pub mod http;

/// URL template compilation and rendering
pub mod template;

/// Settings file loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{register_auth_scheme, AuthConfig, AuthInjector};
pub use config::Settings;
pub use error::{Error, Result};
pub use http::{ClientConfig, CredentialClient};
pub use template::{RenderUrl, UrlTemplate};
pub use types::{Credential, CredentialResponse, UrlTemplateParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
