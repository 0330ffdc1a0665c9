//! Settings file for the credential client
//!
//! A settings file (YAML, or JSON when the extension is `.json`) describes a
//! client and compiles into a [`ClientConfig`]:
//!
//! ```yaml
//! url_template: "https://tokens.internal/db/{{ db_name }}?user={{ username }}&token={{ token }}"
//! read_timeout_ms: 5000
//! connect_timeout_ms: 2000
//! auth:
//!   scheme: NONE
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{ClientConfig, CredentialClient};
use crate::template::UrlTemplate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Client settings as written in a settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Build a client at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// URL template for the token service
    #[serde(default)]
    pub url_template: Option<String>,

    /// Read timeout in milliseconds (0 or unset = default)
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,

    /// Connect timeout in milliseconds (0 or unset = default)
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,

    /// Auth strategy selection
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url_template: None,
            read_timeout_ms: None,
            connect_timeout_ms: None,
            auth: AuthConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "settings file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse settings from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse settings from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Compile into a client config
    pub fn into_client_config(self) -> Result<ClientConfig> {
        let source = self
            .url_template
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::missing_field("url_template"))?;
        let template = UrlTemplate::parse(&source)?;

        let mut config = ClientConfig::new(template);
        config.read_timeout = Duration::from_millis(self.read_timeout_ms.unwrap_or(0));
        config.connect_timeout = Duration::from_millis(self.connect_timeout_ms.unwrap_or(0));
        config.auth_config = self.auth;
        config.check_and_set_defaults();
        Ok(config)
    }

    /// Build a client, or `None` when the settings disable it
    pub fn build_client(self) -> Result<Option<CredentialClient>> {
        if !self.enabled {
            return Ok(None);
        }
        CredentialClient::new(self.into_client_config()?).map(Some)
    }
}
