//! Credential client
//!
//! A lookup goes through these stages, each failing with its own error:
//! - render the URL template
//! - build the GET request
//! - inject auth
//! - send and read the body under the read deadline
//! - decode the JSON body
//! - classify by HTTP status

use crate::auth::{resolve_injector, AuthConfig, AuthInjector, DEFAULT_AUTH_SCHEME};
use crate::error::{Error, Result};
use crate::template::RenderUrl;
use crate::types::{Credential, CredentialResponse, UrlTemplateParams};
use reqwest::{Client, Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the credential client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Compiled URL template
    pub url_template: Arc<dyn RenderUrl>,
    /// Deadline for the whole round trip of a lookup
    pub read_timeout: Duration,
    /// Deadline for establishing a connection
    pub connect_timeout: Duration,
    /// Auth strategy selection
    pub auth_config: AuthConfig,
}

impl ClientConfig {
    /// Create a config with default timeouts and no auth
    pub fn new(url_template: impl RenderUrl + 'static) -> Self {
        Self {
            url_template: Arc::new(url_template),
            read_timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_TIMEOUT,
            auth_config: AuthConfig::new(DEFAULT_AUTH_SCHEME),
        }
    }

    /// Create a new config builder
    pub fn builder(url_template: impl RenderUrl + 'static) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(url_template),
        }
    }

    /// Replace zero timeouts and an empty scheme with defaults
    pub fn check_and_set_defaults(&mut self) {
        if self.read_timeout.is_zero() {
            self.read_timeout = DEFAULT_TIMEOUT;
        }
        if self.connect_timeout.is_zero() {
            self.connect_timeout = DEFAULT_TIMEOUT;
        }
        self.auth_config.scheme = self.auth_config.effective_scheme().to_string();
    }
}

/// Builder for client config
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the read timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Select an auth scheme by name
    pub fn auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.auth_config.scheme = scheme.into();
        self
    }

    /// Set the full auth config
    pub fn auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.config.auth_config = auth_config;
        self
    }

    /// Build the config
    pub fn build(mut self) -> ClientConfig {
        self.config.check_and_set_defaults();
        self.config
    }
}

/// Client for the credential token service
///
/// Cheap to clone; clones share the connection pool. Holds no per-call
/// state, so one instance can serve concurrent lookups.
#[derive(Clone)]
pub struct CredentialClient {
    url_template: Arc<dyn RenderUrl>,
    http: Client,
    read_timeout: Duration,
    connect_timeout: Duration,
    auth_injector: Arc<dyn AuthInjector>,
}

impl CredentialClient {
    /// Create a client from its config
    ///
    /// An unknown auth scheme falls back to the default instead of failing.
    /// Zero timeouts and an empty scheme are replaced with defaults.
    pub fn new(mut config: ClientConfig) -> Result<Self> {
        config.check_and_set_defaults();

        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("db-credentials/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let auth_injector = resolve_injector(&config.auth_config);
        debug!(
            "Credential client ready (auth scheme: {}, read timeout: {:?}, connect timeout: {:?})",
            auth_injector.scheme(),
            config.read_timeout,
            config.connect_timeout
        );

        Ok(Self {
            url_template: config.url_template,
            http,
            read_timeout: config.read_timeout,
            connect_timeout: config.connect_timeout,
            auth_injector,
        })
    }

    /// Scheme of the resolved auth injector
    pub fn auth_scheme(&self) -> &str {
        self.auth_injector.scheme()
    }

    /// Configured read timeout
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Configured connect timeout
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Render the request URL for a lookup
    pub fn build_url(&self, db_name: &str, username: &str, token: &str) -> Result<String> {
        self.url_template
            .render(&UrlTemplateParams::new(db_name, username, token))
    }

    /// Fetch a credential for `username` on `db_name`
    ///
    /// Makes at most one request. The whole round trip is bounded by the
    /// read timeout; to impose a shorter deadline, wrap the returned future
    /// in `tokio::time::timeout` or drop it, which aborts the request.
    /// A dropped call produces no error value; the caller's own timeout
    /// reports the cancellation.
    pub async fn get_credentials(
        &self,
        db_name: &str,
        username: &str,
        token: &str,
    ) -> Result<Credential> {
        let url = self.build_url(db_name, username, token)?;
        let request = self.build_request(&url)?;

        debug!(
            "Requesting credentials for user '{}' on '{}'",
            username, db_name
        );

        let (status, body) = tokio::time::timeout(self.read_timeout, self.send(request))
            .await
            .map_err(|_| Error::Timeout {
                timeout_ms: u64::try_from(self.read_timeout.as_millis()).unwrap_or(u64::MAX),
            })??;

        let credential = classify(status, &body)?;
        debug!("Received credentials for user '{}' on '{}'", username, db_name);
        Ok(credential)
    }

    /// Build the GET request without sending it
    ///
    /// Control characters are rejected rather than stripped or escaped, so
    /// the rendered URL goes on the wire unchanged or not at all.
    fn build_request(&self, url: &str) -> Result<Request> {
        if let Some(pos) = url.bytes().position(|b| b.is_ascii_control()) {
            return Err(Error::request(format!(
                "invalid control character in URL at byte {pos}"
            )));
        }
        let url = Url::parse(url).map_err(|e| Error::request(format!("invalid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::request(format!(
                "unsupported URL scheme '{}'",
                url.scheme()
            )));
        }

        self.http
            .get(url)
            .build()
            .map_err(|e| Error::request(e.to_string()))
    }

    /// Inject auth, send, and read the full body
    async fn send(&self, mut request: Request) -> Result<(StatusCode, Vec<u8>)> {
        self.auth_injector.inject_auth(&mut request).await?;

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

/// Decode the body, then map the status to a credential or a server error
///
/// A malformed body is a decode error even on an error status.
fn classify(status: StatusCode, body: &[u8]) -> Result<Credential> {
    let decoded: CredentialResponse =
        serde_json::from_slice(body).map_err(|e| Error::decode(e.to_string()))?;

    if status.is_success() {
        return decoded
            .response
            .ok_or_else(|| Error::decode("success response carries no credential"));
    }

    warn!(
        "Token service returned {} ({}: {})",
        status.as_u16(),
        decoded.code,
        decoded.msg
    );
    Err(Error::server(status.as_u16(), decoded.code, decoded.msg))
}

impl std::fmt::Debug for CredentialClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialClient")
            .field("url_template", &self.url_template)
            .field("read_timeout", &self.read_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("auth_scheme", &self.auth_injector.scheme())
            .finish_non_exhaustive()
    }
}
