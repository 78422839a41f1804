//! Integration tests for the authentication state machine.
//!
//! Every test runs against a wiremock server standing in for both the buyer
//! API and the public sign-in page.

use serde_json::json;
use shopgoodwill_api::{
    ApiRoot, AuthError, AuthInfo, AuthState, LoginCredentials, Shopgoodwill, ShopgoodwillConfig,
    SiteUrl,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROBE_PATH: &str = "/api/SaveSearches/GetSaveSearches";
const LOGIN_PATH: &str = "/api/SignIn/Login";
const SIGNIN_PAGE_PATH: &str = "/signin";

/// Creates a configuration pointing every URL at the mock server
fn config_for(server: &MockServer) -> ShopgoodwillConfig {
    ShopgoodwillConfig::builder()
        .api_root(ApiRoot::new(format!("{}/api", server.uri())).unwrap())
        .login_page_url(SiteUrl::new(format!("{}{SIGNIN_PAGE_PATH}", server.uri())).unwrap())
        .build()
        .unwrap()
}

async fn mount_signin_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SIGNIN_PAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(server)
        .await;
}

// === Token path ===

#[tokio::test]
async fn test_valid_token_is_adopted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Shopgoodwill::with_config(AuthInfo::from_token("T1"), config_for(&server))
        .await
        .unwrap();

    assert!(client.is_authenticated());
    assert_eq!(
        client.session().headers().authorization(),
        Some("Bearer T1")
    );
    assert_eq!(client.session().state(), AuthState::Authenticated);
}

#[tokio::test]
async fn test_probe_sends_session_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .and(header("Content-Type", "application/json"))
        .and(header("Origin", "https://shopgoodwill.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = Shopgoodwill::with_config(AuthInfo::from_token("T1"), config_for(&server)).await;
    assert_ok!(result);
}

#[tokio::test]
async fn test_unexpected_probe_status_is_fatal_and_clears_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "Maintenance"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth_info =
        AuthInfo::from_token("T1").with_login(LoginCredentials::encrypted("ENC_U", "ENC_P"));
    let mut client = Shopgoodwill::unauthenticated(auth_info, config_for(&server)).unwrap();

    let result = client.authenticate().await;

    match result {
        Err(AuthError::UnexpectedProbeStatus { status, body }) => {
            assert_eq!(status, 503);
            assert!(body.contains("Maintenance"));
        }
        other => panic!("Expected UnexpectedProbeStatus, got: {other:?}"),
    }
    assert!(client.session().headers().authorization().is_none());
    assert_eq!(client.session().state(), AuthState::Failed);
}

// === Credential fallback ===

#[tokio::test]
async fn test_expired_token_with_plaintext_credentials_is_unimplemented() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth_info: AuthInfo = serde_json::from_value(json!({
        "accessToken": "expired",
        "userName": "bidder",
        "password": "hunter2"
    }))
    .unwrap();

    let result = Shopgoodwill::with_config(auth_info, config_for(&server)).await;

    assert!(matches!(result, Err(AuthError::UnimplementedEncryption)));
}

#[tokio::test]
async fn test_plaintext_credentials_make_no_network_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut client =
        Shopgoodwill::unauthenticated(AuthInfo::from_plaintext("bidder", "hunter2"), config_for(&server))
            .unwrap();

    let error = assert_err!(client.authenticate().await);
    assert!(matches!(error, AuthError::UnimplementedEncryption));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_expired_token_falls_back_to_encrypted_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_signin_page(&server).await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({
            "browser": "firefox",
            "remember": false,
            "clientIpAddress": "0.0.0.4",
            "appVersion": "00099a1be3bb023ff17d",
            "username": "ENC_U",
            "password": "ENC_P"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "T2"})))
        .expect(1)
        .mount(&server)
        .await;

    let auth_info =
        AuthInfo::from_token("expired").with_login(LoginCredentials::encrypted("ENC_U", "ENC_P"));
    let client = Shopgoodwill::with_config(auth_info, config_for(&server))
        .await
        .unwrap();

    assert_eq!(client.access_token(), Some("T2"));
    assert_eq!(client.session().auth_info().access_token(), Some("T2"));
}

#[tokio::test]
async fn test_login_checks_signin_page_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SIGNIN_PAGE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "T3"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Shopgoodwill::with_config(
        AuthInfo::from_encrypted("ENC_U", "ENC_P"),
        config_for(&server),
    )
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec![SIGNIN_PAGE_PATH, LOGIN_PATH]);
    assert_eq!(client.access_token(), Some("T3"));
}

#[tokio::test]
async fn test_signin_page_error_status_does_not_stop_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SIGNIN_PAGE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "T4"})))
        .mount(&server)
        .await;

    let client = Shopgoodwill::with_config(
        AuthInfo::from_encrypted("ENC_U", "ENC_P"),
        config_for(&server),
    )
    .await
    .unwrap();

    assert_eq!(client.access_token(), Some("T4"));
}

#[tokio::test]
async fn test_login_without_token_fails() {
    let server = MockServer::start().await;
    mount_signin_page(&server).await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let mut client = Shopgoodwill::unauthenticated(
        AuthInfo::from_encrypted("ENC_U", "WRONG"),
        config_for(&server),
    )
    .unwrap();

    let result = client.authenticate().await;

    assert!(matches!(result, Err(AuthError::LoginFailed { status: 200 })));
    assert!(client.session().headers().authorization().is_none());
    assert_eq!(client.session().state(), AuthState::Failed);
}

#[tokio::test]
async fn test_login_with_empty_token_fails() {
    let server = MockServer::start().await;
    mount_signin_page(&server).await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": ""})))
        .mount(&server)
        .await;

    let result = Shopgoodwill::with_config(
        AuthInfo::from_encrypted("ENC_U", "ENC_P"),
        config_for(&server),
    )
    .await;

    assert!(matches!(result, Err(AuthError::LoginFailed { .. })));
}

#[tokio::test]
async fn test_rejected_token_without_credentials_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = Shopgoodwill::with_config(AuthInfo::from_token("expired"), config_for(&server)).await;

    assert!(matches!(result, Err(AuthError::InvalidAuthInfo)));
}

#[tokio::test]
async fn test_empty_auth_info_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = Shopgoodwill::with_config(AuthInfo::new(), config_for(&server)).await;

    assert!(matches!(result, Err(AuthError::InvalidAuthInfo)));
}

// === Re-authentication ===

#[tokio::test]
async fn test_reauthenticate_tries_token_from_previous_login() {
    let server = MockServer::start().await;
    mount_signin_page(&server).await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "T5"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .and(header("Authorization", "Bearer T5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Shopgoodwill::with_config(
        AuthInfo::from_encrypted("ENC_U", "ENC_P"),
        config_for(&server),
    )
    .await
    .unwrap();

    assert_ok!(client.authenticate().await);
    assert_eq!(client.access_token(), Some("T5"));
}

#[tokio::test]
async fn test_access_token_is_valid_probe() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .and(header("Authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .and(header("Authorization", "Bearer bad"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut client =
        Shopgoodwill::unauthenticated(AuthInfo::new(), config_for(&server)).unwrap();

    assert!(!client.access_token_is_valid("bad").await.unwrap());
    assert!(!client.is_authenticated());

    assert!(client.access_token_is_valid("good").await.unwrap());
    assert_eq!(client.access_token(), Some("good"));
}

#[tokio::test]
async fn test_standalone_token_check_updates_state_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .and(header("Authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PROBE_PATH))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut client =
        Shopgoodwill::unauthenticated(AuthInfo::from_token("expired"), config_for(&server))
            .unwrap();
    assert_err!(client.authenticate().await);
    assert_eq!(client.session().state(), AuthState::Failed);

    assert!(client.access_token_is_valid("fresh").await.unwrap());
    assert!(client.is_authenticated());
    assert_eq!(client.session().state(), AuthState::Authenticated);

    assert!(!client.access_token_is_valid("expired").await.unwrap());
    assert!(!client.is_authenticated());
    assert_eq!(client.session().state(), AuthState::Failed);
}

#[tokio::test]
async fn test_standalone_login_updates_state() {
    let server = MockServer::start().await;
    mount_signin_page(&server).await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({
            "browser": "firefox",
            "remember": false,
            "clientIpAddress": "0.0.0.4",
            "appVersion": "00099a1be3bb023ff17d",
            "username": "ENC_U",
            "password": "ENC_P"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "T6"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut client = Shopgoodwill::unauthenticated(AuthInfo::new(), config_for(&server)).unwrap();

    assert_ok!(client.login("ENC_U", "ENC_P").await);
    assert_eq!(client.session().state(), AuthState::Authenticated);
    assert_eq!(client.access_token(), Some("T6"));

    assert_err!(client.login("ENC_U", "WRONG").await);
    assert_eq!(client.session().state(), AuthState::Failed);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_network_failure_surfaces_as_http_error() {
    // Nothing listens on port 1
    let config = ShopgoodwillConfig::builder()
        .api_root(ApiRoot::new("http://127.0.0.1:1/api").unwrap())
        .build()
        .unwrap();

    let result = Shopgoodwill::with_config(AuthInfo::from_token("T1"), config).await;

    assert!(matches!(
        result,
        Err(AuthError::Http(shopgoodwill_api::HttpError::Network(_)))
    ));
}
