//! Integration tests using mock HTTP server
//!
//! Tests the full flow through the public API: settings → client → HTTP
//! request → credential or error.

use async_trait::async_trait;
use db_credentials::auth::{is_registered, register_auth_scheme, AuthConfig, AuthInjector};
use db_credentials::{Credential, CredentialClient, Error, Result, Settings};
use pretty_assertions::assert_eq;
use reqwest::Request;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, auth: &str) -> Settings {
    Settings::from_yaml_str(&format!(
        r#"
url_template: "{}/v1/db/{{{{ db_name }}}}/credentials?user={{{{ username }}}}&token={{{{ token }}}}"
read_timeout_ms: 1000
connect_timeout_ms: 1000
{auth}
"#,
        server.uri()
    ))
    .unwrap()
}

fn client_for(server: &MockServer) -> CredentialClient {
    settings_for(server, "").build_client().unwrap().unwrap()
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_fetch_credentials_from_settings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/db/orders/credentials"))
        .and(query_param("user", "alice"))
        .and(query_param("token", "opaque"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"username": "v-alice-3f9", "password": "s3cr3t"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let credential = client
        .get_credentials("orders", "alice", "opaque")
        .await
        .unwrap();

    assert_eq!(credential, Credential::new("v-alice-3f9", "s3cr3t"));
}

#[tokio::test]
async fn test_settings_file_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/creds/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"username": "abcd", "password": "abcd"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        "{}",
        json!({
            "url_template": format!("{}/creds/{{{{.DBName}}}}", mock_server.uri()),
            "read_timeout_ms": 1000,
            "auth": {"scheme": "NONE"}
        })
    )
    .unwrap();

    let client = Settings::from_file(file.path())
        .unwrap()
        .build_client()
        .unwrap()
        .unwrap();
    assert_eq!(client.read_timeout(), Duration::from_secs(1));
    assert_eq!(client.auth_scheme(), "NONE");

    let (user, pass) = client
        .get_credentials("analytics", "bob", "t")
        .await
        .unwrap()
        .into_pair();
    assert_eq!((user.as_str(), pass.as_str()), ("abcd", "abcd"));
}

// ============================================================================
// Failure Path
// ============================================================================

#[tokio::test]
async fn test_service_error_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "TOKEN_EXPIRED",
            "msg": "token has expired"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .get_credentials("orders", "alice", "stale")
        .await
        .unwrap_err();

    match err {
        Error::Server { status, code, msg } => {
            assert_eq!(status, 403);
            assert_eq!(code, "TOKEN_EXPIRED");
            assert_eq!(msg, "token has expired");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_error_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{]"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .get_credentials("orders", "alice", "t")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
    assert!(!err.to_string().contains("123: some error"));
}

#[tokio::test]
async fn test_unknown_scheme_degrades_to_no_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"username": "u", "password": "p"}
        })))
        .mount(&mock_server)
        .await;

    let client = settings_for(&mock_server, "auth:\n  scheme: DOES_NOT_EXIST")
        .build_client()
        .unwrap()
        .unwrap();
    assert_eq!(client.auth_scheme(), "NONE");

    client.get_credentials("db", "user", "t").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

// ============================================================================
// Extension Point
// ============================================================================

/// Forwards the caller's service key as an `X-Service-Key` header
#[derive(Debug)]
struct ServiceKeyInjector {
    key: String,
}

#[async_trait]
impl AuthInjector for ServiceKeyInjector {
    fn scheme(&self) -> &str {
        "SERVICE_KEY"
    }

    async fn inject_auth(&self, request: &mut Request) -> Result<()> {
        let value: reqwest::header::HeaderValue = self
            .key
            .parse()
            .map_err(|_| Error::auth("SERVICE_KEY", "invalid key"))?;
        request.headers_mut().insert("x-service-key", value);
        Ok(())
    }
}

#[tokio::test]
async fn test_custom_scheme_from_settings() {
    register_auth_scheme("SERVICE_KEY", |config: &AuthConfig| {
        Arc::new(ServiceKeyInjector {
            key: config.options.get("key").cloned().unwrap_or_default(),
        }) as Arc<dyn AuthInjector>
    })
    .unwrap();
    assert!(is_registered("SERVICE_KEY"));

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("x-service-key", "k-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"username": "u", "password": "p"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = settings_for(
        &mock_server,
        "auth:\n  scheme: SERVICE_KEY\n  options:\n    key: k-123",
    )
    .build_client()
    .unwrap()
    .unwrap();

    let credential = client.get_credentials("db", "user", "t").await.unwrap();
    assert_eq!(credential, Credential::new("u", "p"));
}
