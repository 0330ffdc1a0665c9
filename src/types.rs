//! Common types used throughout db-credentials
//!
//! Wire shapes exchanged with the token service and the values handed
//! back to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Template Parameters
// ============================================================================

/// Values available to the URL template for a single lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlTemplateParams<'a> {
    /// Target database name
    pub db_name: &'a str,
    /// Requesting username
    pub username: &'a str,
    /// Opaque token forwarded to the service
    pub token: &'a str,
}

impl<'a> UrlTemplateParams<'a> {
    /// Create a new parameter set
    pub fn new(db_name: &'a str, username: &'a str, token: &'a str) -> Self {
        Self {
            db_name,
            username,
            token,
        }
    }

    /// Look up a field by name
    ///
    /// Accepts both `db_name`/`username`/`token` and the `DBName`/`Username`/
    /// `Token` spellings used by older templates.
    pub fn get(&self, field: &str) -> Option<&'a str> {
        match field {
            "db_name" | "DBName" => Some(self.db_name),
            "username" | "Username" => Some(self.username),
            "token" | "Token" => Some(self.token),
            _ => None,
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Response body returned by the token service
///
/// `response` is set on success, `code`/`msg` on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialResponse {
    #[serde(default)]
    pub response: Option<Credential>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub msg: String,
}

/// Database credential issued by the token service
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Split into a `(username, password)` pair
    pub fn into_pair(self) -> (String, String) {
        (self.username, self.password)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
