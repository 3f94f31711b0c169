//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use gatehouse_auth::SessionController;
use gatehouse_core::config::AppConfig;

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Register, login, check, and logout flows
    pub sessions: Arc<SessionController>,
}

impl AppState {
    /// Creates state from the loaded configuration and a ready controller.
    pub fn new(config: AppConfig, sessions: SessionController) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
        }
    }

    /// Name of the cookie carrying the session token.
    pub fn cookie_name(&self) -> &str {
        &self.config.auth.cookie_name
    }
}
