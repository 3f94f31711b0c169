//! # gatehouse-api
//!
//! HTTP API layer for Gatehouse built on Axum.
//!
//! Exposes registration, session check, login, and logout over JSON, carries
//! the session token in a cookie, and maps [`gatehouse_core::AppError`] to
//! status codes in one place.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::serve;
pub use router::build_router;
pub use state::AppState;
