//! Integration tests for registration and login.

mod helpers;

use http::StatusCode;

use gatehouse_database::UserStore;

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let app = helpers::TestApp::new();

    let response = app.register("alice", "correct horse").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({"result": "success"}));

    let cookie = response.set_cookie.as_deref().expect("Set-Cookie missing");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let token = response.session_token().expect("token missing");
    let check = app.check_with_cookie(&token).await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.body["sub"], "alice");
}

#[tokio::test]
async fn test_register_stores_hash_not_password() {
    let app = helpers::TestApp::new();
    app.register("alice", "correct horse").await;

    let user = app.users.find_by_username("alice").await.unwrap();
    assert_ne!(user.password_hash, "correct horse");
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = helpers::TestApp::new();
    assert_eq!(app.register("alice", "first").await.status, StatusCode::OK);

    let response = app.register("alice", "second").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body["error"].is_string());
    assert!(response.set_cookie.is_none());
    assert_eq!(app.users.count().await.unwrap(), 1);

    // The original password is still the one that works.
    assert_eq!(app.login("alice", "first").await.status, StatusCode::OK);
    assert_eq!(app.login("alice", "second").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_empty_fields() {
    let app = helpers::TestApp::new();

    let response = app.register("", "pw").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Username is required");

    let response = app.register("alice", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Password is required");

    assert_eq!(app.users.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_rejects_malformed_body() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/users", Some(serde_json::json!({"username": "alice"})), &[])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());

    let response = app.request("POST", "/users", None, &[]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new();
    app.register("alice", "correct horse").await;

    let response = app.login("alice", "correct horse").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({"result": "success"}));
    let token = response.session_token().expect("token missing");
    assert_eq!(app.check_with_cookie(&token).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = helpers::TestApp::new();
    app.register("alice", "correct horse").await;

    let wrong_password = app.login("alice", "battery staple").await;
    let unknown_user = app.login("mallory", "correct horse").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(
        wrong_password.body,
        serde_json::json!({"error": "Incorrect username or password"})
    );
    assert!(wrong_password.set_cookie.is_none());
    assert!(unknown_user.set_cookie.is_none());
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let app = helpers::TestApp::new();
    app.register("alice", "correct horse").await;

    let response = app.login("Alice", "correct horse").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_single_winner() {
    let app = helpers::TestApp::new();

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let app = app.clone();
        tasks.spawn(async move { app.register("contested", &format!("pw-{i}")).await.status });
    }
    let statuses = tasks.join_all().await;

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(),
        7
    );
    assert_eq!(app.users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_store_failure_returns_generic_error() {
    let app = helpers::TestApp::with_unreachable_store();

    for response in [
        app.register("alice", "correct horse").await,
        app.login("alice", "correct horse").await,
    ] {
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body,
            serde_json::json!({"error": "Internal server error"})
        );
        assert!(!response.body.to_string().contains(helpers::UNREACHABLE_DETAIL));
        assert!(response.set_cookie.is_none());
    }
}
