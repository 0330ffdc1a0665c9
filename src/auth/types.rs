//! Auth configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scheme name of the built-in no-op strategy
pub const NONE_AUTH_SCHEME: &str = "NONE";

/// Scheme used when none (or an unknown one) is configured
pub const DEFAULT_AUTH_SCHEME: &str = NONE_AUTH_SCHEME;

/// Selects and parameterizes the auth strategy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Registered scheme name (empty means the default)
    #[serde(default)]
    pub scheme: String,
    /// Strategy-specific settings, passed through to the factory
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl AuthConfig {
    /// Create a config for the given scheme
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            options: HashMap::new(),
        }
    }

    /// Add a strategy option
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Scheme name with the default applied
    pub fn effective_scheme(&self) -> &str {
        if self.scheme.is_empty() {
            DEFAULT_AUTH_SCHEME
        } else {
            &self.scheme
        }
    }
}
