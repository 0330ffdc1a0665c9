//! Auth injector trait and the built-in no-op strategy

use super::types::NONE_AUTH_SCHEME;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Request;
use std::fmt::Debug;

/// Attaches authentication material to an outgoing request
///
/// Called once per lookup, after the request is built and before it is sent.
/// An error aborts the lookup without any network I/O.
#[async_trait]
pub trait AuthInjector: Send + Sync + Debug {
    /// Scheme name this injector was registered under
    fn scheme(&self) -> &str;

    /// Mutate the request (headers, query) to carry credentials
    async fn inject_auth(&self, request: &mut Request) -> Result<()>;
}

/// Injects nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthInjector;

#[async_trait]
impl AuthInjector for NoAuthInjector {
    fn scheme(&self) -> &str {
        NONE_AUTH_SCHEME
    }

    async fn inject_auth(&self, _request: &mut Request) -> Result<()> {
        Ok(())
    }
}
