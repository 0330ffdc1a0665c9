//! Process-wide registry of auth scheme factories

use super::injector::{AuthInjector, NoAuthInjector};
use super::types::{AuthConfig, DEFAULT_AUTH_SCHEME, NONE_AUTH_SCHEME};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::{debug, warn};

/// Builds an injector from its config
pub type AuthFactory = Arc<dyn Fn(&AuthConfig) -> Arc<dyn AuthInjector> + Send + Sync>;

static REGISTRY: LazyLock<RwLock<HashMap<String, AuthFactory>>> = LazyLock::new(|| {
    let mut factories: HashMap<String, AuthFactory> = HashMap::new();
    factories.insert(
        NONE_AUTH_SCHEME.to_string(),
        Arc::new(|_: &AuthConfig| Arc::new(NoAuthInjector) as Arc<dyn AuthInjector>),
    );
    RwLock::new(factories)
});

/// Register a factory under a scheme name
///
/// Replaces any factory previously registered under `name`. The default
/// scheme cannot be replaced.
pub fn register_auth_scheme<F>(name: impl Into<String>, factory: F) -> Result<()>
where
    F: Fn(&AuthConfig) -> Arc<dyn AuthInjector> + Send + Sync + 'static,
{
    let name = name.into();
    if name.is_empty() {
        return Err(Error::config("auth scheme name must not be empty"));
    }
    if name == DEFAULT_AUTH_SCHEME {
        return Err(Error::config(format!(
            "auth scheme '{name}' is built in and cannot be replaced"
        )));
    }

    let mut factories = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if factories.insert(name.clone(), Arc::new(factory)).is_some() {
        debug!("Replaced auth scheme factory: {}", name);
    } else {
        debug!("Registered auth scheme: {}", name);
    }
    Ok(())
}

/// Check if a scheme has a registered factory
pub fn is_registered(name: &str) -> bool {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(name)
}

/// All registered scheme names, sorted
pub fn registered_schemes() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

/// Resolve the injector for a config
///
/// Falls back to the default scheme when the configured one is empty or
/// unknown; this never fails.
pub fn resolve_injector(config: &AuthConfig) -> Arc<dyn AuthInjector> {
    let (default, configured) = {
        let factories = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
        let configured = if config.scheme.is_empty() {
            None
        } else {
            factories.get(config.scheme.as_str()).cloned()
        };
        (factories.get(DEFAULT_AUTH_SCHEME).cloned(), configured)
    };

    if let Some(factory) = configured {
        return factory(config);
    }
    if !config.scheme.is_empty() {
        warn!(
            "Unknown auth scheme '{}', falling back to {}",
            config.scheme, DEFAULT_AUTH_SCHEME
        );
    }
    match default {
        Some(factory) => factory(config),
        None => Arc::new(NoAuthInjector),
    }
}
