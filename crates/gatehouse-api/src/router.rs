//! Route definitions for the Gatehouse HTTP API.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(user_routes())
        .merge(session_routes())
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Account creation
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(handlers::users::register))
}

/// Session lifecycle: check, login, logout
fn session_routes() -> Router<AppState> {
    Router::new().route(
        "/session",
        get(handlers::session::check)
            .post(handlers::session::login)
            .delete(handlers::session::logout),
    )
}
