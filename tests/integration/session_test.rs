//! Integration tests for session check, logout, and health.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;
use http::header::COOKIE;

#[tokio::test]
async fn test_check_with_bearer_header() {
    let app = helpers::TestApp::new();
    let token = app
        .register("alice", "correct horse")
        .await
        .session_token()
        .unwrap();

    let response = app.check_with_bearer(&token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sub"], "alice");
    let iat = response.body["iat"].as_i64().unwrap();
    let exp = response.body["exp"].as_i64().unwrap();
    assert_eq!(exp - iat, 24 * 3600);
}

#[tokio::test]
async fn test_check_without_token() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/session", None, &[]).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, serde_json::json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn test_check_rejects_garbage_and_foreign_tokens() {
    let app = helpers::TestApp::new();

    let garbage = app.check_with_cookie("not.a.token").await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["error"], "Unauthorized");

    let mut foreign = app.config.auth.clone();
    foreign.jwt_secret = "some-other-deployment-secret-0123456789".to_string();
    let forged = gatehouse_auth::JwtEncoder::new(&foreign)
        .unwrap()
        .issue("alice")
        .unwrap();
    let response = app.check_with_cookie(&forged.token).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_check_rejects_expired_token() {
    let app = helpers::TestApp::new();
    let encoder = app.encoder();
    let stale = encoder
        .issue_at("alice", Utc::now() - encoder.ttl() - Duration::seconds(5))
        .unwrap();

    let response = app.check_with_cookie(&stale.token).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, serde_json::json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn test_check_does_not_consult_store() {
    let app = helpers::TestApp::new();
    // Never registered: the token alone is enough.
    let token = app.encoder().issue("ghost").unwrap().token;

    let response = app.check_with_cookie(&token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sub"], "ghost");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = helpers::TestApp::new();
    let token = app
        .register("alice", "correct horse")
        .await
        .session_token()
        .unwrap();

    let response = app
        .request("DELETE", "/session", None, &[(COOKIE, app.cookie_header(&token))])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({"result": "success"}));
    let cookie = response.set_cookie.as_deref().expect("removal cookie missing");
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(response.session_token().is_none());
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let app = helpers::TestApp::new();

    let response = app.request("DELETE", "/session", None, &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["result"], "success");

    let response = app
        .request("DELETE", "/session", None, &[(COOKIE, app.cookie_header("garbage"))])
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_replayed_token_still_valid_after_logout() {
    let app = helpers::TestApp::new();
    let token = app
        .register("alice", "correct horse")
        .await
        .session_token()
        .unwrap();

    app.request("DELETE", "/session", None, &[(COOKIE, app.cookie_header(&token))])
        .await;

    // Tokens are not revoked server-side; a copy kept by the client works
    // until it expires.
    let response = app.check_with_cookie(&token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sub"], "alice");
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/health", None, &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let app = helpers::TestApp::with_unreachable_store();

    let response = app.request("GET", "/health", None, &[]).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "unavailable");
}
