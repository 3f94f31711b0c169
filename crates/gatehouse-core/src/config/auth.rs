//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Shortest signing secret accepted, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest session token lifetime accepted, in hours (one year).
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

/// Lowest Argon2 memory cost accepted, in KiB.
pub const MIN_ARGON2_MEMORY_KIB: u32 = 8 * 1024;

/// Token signing, session cookie, and password hashing configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie is flagged `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Validate the signing secret, token lifetime, and hashing cost.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret (or SECRET_KEY) must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }

        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_hours must be between 1 and {MAX_TOKEN_TTL_HOURS}"
            )));
        }

        if self.argon2_memory_kib < MIN_ARGON2_MEMORY_KIB || self.argon2_iterations == 0 {
            return Err(AppError::configuration(format!(
                "Argon2 cost too low: need at least {MIN_ARGON2_MEMORY_KIB} KiB and 1 iteration"
            )));
        }

        if self.argon2_parallelism == 0 {
            return Err(AppError::configuration(
                "auth.argon2_parallelism must be positive",
            ));
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"****")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("argon2_memory_kib", &self.argon2_memory_kib)
            .field("argon2_iterations", &self.argon2_iterations)
            .field("argon2_parallelism", &self.argon2_parallelism)
            .finish()
    }
}

fn default_token_ttl() -> u64 {
    24
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_argon2_memory() -> u32 {
    19 * 1024
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
