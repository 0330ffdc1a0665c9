//! Tests for the auth module

use super::*;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Request;
use std::sync::Arc;
use test_case::test_case;

/// Copies a static header from the scheme options onto every request
#[derive(Debug)]
struct StaticHeaderInjector {
    scheme: String,
    header: String,
    value: Option<String>,
}

#[async_trait]
impl AuthInjector for StaticHeaderInjector {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    async fn inject_auth(&self, request: &mut Request) -> Result<()> {
        let value = self
            .value
            .as_deref()
            .ok_or_else(|| Error::auth(&self.scheme, "missing 'value' option"))?;
        let name = HeaderName::from_bytes(self.header.as_bytes())
            .map_err(|e| Error::auth(&self.scheme, e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| Error::auth(&self.scheme, e.to_string()))?;
        request.headers_mut().insert(name, value);
        Ok(())
    }
}

fn register_static_header(name: &'static str) {
    register_auth_scheme(name, move |config: &AuthConfig| {
        Arc::new(StaticHeaderInjector {
            scheme: name.to_string(),
            header: config
                .options
                .get("header")
                .cloned()
                .unwrap_or_else(|| "X-Auth".to_string()),
            value: config.options.get("value").cloned(),
        }) as Arc<dyn AuthInjector>
    })
    .unwrap();
}

fn get_request() -> Request {
    reqwest::Client::new()
        .get("https://example.com/creds")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_no_auth() {
    let mut req = get_request();
    NoAuthInjector.inject_auth(&mut req).await.unwrap();
    assert!(req.headers().is_empty());
    assert_eq!(req.url().as_str(), "https://example.com/creds");
}

#[test_case("NONE" ; "explicit none")]
#[test_case("" ; "empty scheme")]
#[test_case("abcd" ; "unregistered scheme")]
fn test_resolve_falls_back_to_default(scheme: &str) {
    let injector = resolve_injector(&AuthConfig::new(scheme));
    assert_eq!(injector.scheme(), NONE_AUTH_SCHEME);
}

#[test]
fn test_default_scheme_always_registered() {
    assert!(is_registered(DEFAULT_AUTH_SCHEME));
    assert!(registered_schemes().contains(&NONE_AUTH_SCHEME.to_string()));
}

#[test]
fn test_register_rejects_default_and_empty() {
    let factory = |_: &AuthConfig| Arc::new(NoAuthInjector) as Arc<dyn AuthInjector>;
    assert!(matches!(
        register_auth_scheme(DEFAULT_AUTH_SCHEME, factory),
        Err(Error::Config { .. })
    ));
    assert!(matches!(
        register_auth_scheme("", factory),
        Err(Error::Config { .. })
    ));
    assert_eq!(resolve_injector(&AuthConfig::default()).scheme(), "NONE");
}

#[tokio::test]
async fn test_registered_scheme_is_resolved() {
    register_static_header("AUTH_TEST_STATIC");
    assert!(is_registered("AUTH_TEST_STATIC"));

    let config = AuthConfig::new("AUTH_TEST_STATIC")
        .option("header", "X-Api-Key")
        .option("value", "secret-123");
    let injector = resolve_injector(&config);
    assert_eq!(injector.scheme(), "AUTH_TEST_STATIC");

    let mut req = get_request();
    injector.inject_auth(&mut req).await.unwrap();
    assert_eq!(req.headers().get("X-Api-Key").unwrap(), "secret-123");
}

#[tokio::test]
async fn test_injector_failure() {
    register_static_header("AUTH_TEST_MISSING_VALUE");

    let injector = resolve_injector(&AuthConfig::new("AUTH_TEST_MISSING_VALUE"));
    let mut req = get_request();
    let err = injector.inject_auth(&mut req).await.unwrap_err();

    assert!(matches!(err, Error::AuthInjection { ref scheme, .. } if scheme == "AUTH_TEST_MISSING_VALUE"));
    assert_eq!(err.stage(), "auth");
    assert!(req.headers().is_empty());
}

#[test]
fn test_register_replaces_factory() {
    register_static_header("AUTH_TEST_REPLACE");
    register_auth_scheme("AUTH_TEST_REPLACE", |_: &AuthConfig| {
        Arc::new(NoAuthInjector) as Arc<dyn AuthInjector>
    })
    .unwrap();

    let injector = resolve_injector(&AuthConfig::new("AUTH_TEST_REPLACE"));
    assert_eq!(injector.scheme(), NONE_AUTH_SCHEME);
}

#[test]
fn test_registered_schemes_sorted() {
    register_static_header("AUTH_TEST_ZZZ");
    register_static_header("AUTH_TEST_AAA");

    let names = registered_schemes();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}
