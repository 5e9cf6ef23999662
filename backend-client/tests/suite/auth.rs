use illustra_backend_client::ApiError;
use illustra_backend_client::Session;
use illustra_backend_client::get_auth_file;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;

use super::client_for;

#[tokio::test]
async fn login_persists_nested_tokens() {
    let home = TempDir::new().expect("tempdir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"email": "mechanic@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "email": "mechanic@example.com"},
            "tokens": {"access": "access-1", "refresh": "refresh-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_home(home.path()).expect("session"));
    let tokens = client
        .login("mechanic@example.com", "hunter2")
        .await
        .expect("login");
    assert_eq!(tokens.access, "access-1");
    assert!(get_auth_file(home.path()).exists());

    let reloaded = Session::from_home(home.path()).expect("reload");
    assert_eq!(reloaded.access_token(), Some("access-1".to_string()));
    assert_eq!(
        reloaded.credentials().and_then(|c| c.email),
        Some("mechanic@example.com".to_string())
    );
}

#[tokio::test]
async fn refresh_replaces_access_token() {
    let home = TempDir::new().expect("tempdir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "old", "refresh": "r1"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .and(body_json(json!({"refresh": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "new"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/favorites/"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_home(home.path()).expect("session"));
    client.login("a@example.com", "pw").await.expect("login");
    let access = client.refresh_access_token().await.expect("refresh");
    assert_eq!(access, "new");
    assert_eq!(client.session().refresh_token(), Some("r1".to_string()));
    client.list_favorites().await.expect("favorites with new token");
}

#[tokio::test]
async fn refresh_without_token_fails_locally() {
    let server = MockServer::start().await;
    let client = client_for(&server, Session::anonymous());
    let result = client.refresh_access_token().await;
    assert!(matches!(result, Err(ApiError::MissingRefreshToken)));
}

#[tokio::test]
async fn logout_removes_auth_file() {
    let home = TempDir::new().expect("tempdir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a", "refresh": "r"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Session::from_home(home.path()).expect("session"));
    client.login("a@example.com", "pw").await.expect("login");
    assert!(client.logout().expect("logout"));
    assert!(!client.session().is_signed_in());
    assert!(!get_auth_file(home.path()).exists());
    assert!(!client.logout().expect("second logout"));
}

#[tokio::test]
async fn unauthorized_is_distinct() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/favorites/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Authentication credentials were not provided."})))
        .mount(&server)
        .await;

    let client = client_for(&server, Session::anonymous());
    let result = client.list_favorites().await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}
