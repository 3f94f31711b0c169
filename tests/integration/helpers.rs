//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use gatehouse_api::{AppState, build_router};
use gatehouse_auth::{JwtEncoder, SessionController};
use gatehouse_core::config::AppConfig;
use gatehouse_core::config::auth::MIN_ARGON2_MEMORY_KIB;
use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_database::{MemoryUserStore, UserStore};
use gatehouse_entity::user::{CreateUser, User};

/// Test application context
#[derive(Clone)]
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User store behind the router
    pub users: Arc<dyn UserStore>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application backed by an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryUserStore::new()))
    }

    /// Create a test application whose user store is always unreachable
    pub fn with_unreachable_store() -> Self {
        Self::with_store(Arc::new(UnreachableStore))
    }

    /// Create a test application over the given user store
    pub fn with_store(users: Arc<dyn UserStore>) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
        config.auth.argon2_memory_kib = MIN_ARGON2_MEMORY_KIB;
        config.auth.argon2_iterations = 1;
        config.validate().expect("Test config should be valid");

        let sessions = SessionController::from_config(&config.auth, Arc::clone(&users))
            .expect("Failed to build session controller");

        let router = build_router(AppState::new(config.clone(), sessions));

        Self {
            router,
            users,
            config,
        }
    }

    /// Encoder sharing the app's secret, for minting tokens at arbitrary times
    pub fn encoder(&self) -> JwtEncoder {
        JwtEncoder::new(&self.config.auth).expect("Failed to build encoder")
    }

    /// Make a JSON request with optional extra headers
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(http::HeaderName, String)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        for (name, value) in headers {
            req = req.header(name, value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a fully built request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }

    /// POST /users
    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/users",
            Some(serde_json::json!({"username": username, "password": password})),
            &[],
        )
        .await
    }

    /// POST /session
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/session",
            Some(serde_json::json!({"username": username, "password": password})),
            &[],
        )
        .await
    }

    /// GET /session presenting `token` in the session cookie
    pub async fn check_with_cookie(&self, token: &str) -> TestResponse {
        self.request("GET", "/session", None, &[(COOKIE, self.cookie_header(token))])
            .await
    }

    /// GET /session presenting `token` as a bearer credential
    pub async fn check_with_bearer(&self, token: &str) -> TestResponse {
        self.request(
            "GET",
            "/session",
            None,
            &[(AUTHORIZATION, format!("Bearer {token}"))],
        )
        .await
    }

    /// `Cookie` header value carrying `token`
    pub fn cookie_header(&self, token: &str) -> String {
        format!("{}={}", self.config.auth.cookie_name, token)
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// First `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// Token value from the `Set-Cookie` header
    pub fn session_token(&self) -> Option<String> {
        let header = self.set_cookie.as_deref()?;
        let pair = header.split(';').next()?;
        let (_, value) = pair.split_once('=')?;
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// A user store whose backend is always down
pub struct UnreachableStore;

#[async_trait]
impl UserStore for UnreachableStore {
    async fn create(&self, _data: &CreateUser) -> AppResult<User> {
        Err(unreachable_error())
    }

    async fn find_by_username(&self, _username: &str) -> AppResult<User> {
        Err(unreachable_error())
    }

    async fn count(&self) -> AppResult<u64> {
        Err(unreachable_error())
    }

    async fn health_check(&self) -> AppResult<()> {
        Err(unreachable_error())
    }
}

/// Carries detail that must never reach a response body
pub const UNREACHABLE_DETAIL: &str = "connection refused by db-primary.internal:5432";

fn unreachable_error() -> AppError {
    AppError::with_source(
        ErrorKind::Database,
        format!("Failed to reach user store: {UNREACHABLE_DETAIL}"),
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, UNREACHABLE_DETAIL),
    )
}
