//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

/// Body of both the register and the login request.
#[derive(Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
