//! Error types for db-credentials
//!
//! Every failure of a credential lookup maps to exactly one variant here, and
//! each variant belongs to the stage of the call that produced it (see
//! [`Error::stage`]). Nothing is retried or swallowed.

use thiserror::Error;

/// The main error type for db-credentials
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid request: {message}")]
    RequestConstruction { message: String },

    #[error("Auth injection failed for scheme '{scheme}': {message}")]
    AuthInjection { scheme: String, message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// Well-formed error response from the token service
    #[error("{code}: {msg}")]
    Server {
        status: u16,
        code: String,
        msg: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a template syntax error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create a request construction error
    pub fn request(message: impl Into<String>) -> Self {
        Self::RequestConstruction {
            message: message.into(),
        }
    }

    /// Create an auth injection error
    pub fn auth(scheme: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AuthInjection {
            scheme: scheme.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a server error from the service's `code`/`msg` pair
    pub fn server(status: u16, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Server {
            status,
            code: code.into(),
            msg: msg.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Name of the stage that produced this error
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Template { .. } | Error::UndefinedVariable { .. } => "template",
            Error::RequestConstruction { .. } => "request",
            Error::AuthInjection { .. } => "auth",
            Error::Transport(_) | Error::Timeout { .. } => "transport",
            Error::Decode { .. } => "decode",
            Error::Server { .. } => "server",
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::YamlParse(_)
            | Error::JsonParse(_)
            | Error::Io(_) => "config",
            Error::Other(_) => "other",
        }
    }

    /// Check if the call ran out of time
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Result type alias for db-credentials
pub type Result<T> = std::result::Result<T, Error>;
