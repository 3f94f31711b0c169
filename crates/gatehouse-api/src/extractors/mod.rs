//! Custom Axum extractors.

pub mod json;
pub mod session_token;

pub use json::ValidatedJson;
pub use session_token::SessionToken;
