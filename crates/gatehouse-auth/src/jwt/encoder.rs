//! Session token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use gatehouse_core::config::auth::{AuthConfig, MAX_TOKEN_TTL_HOURS};
use gatehouse_core::error::AppError;

use super::claims::Claims;

/// Signs session tokens with the process-wide HMAC secret.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

/// A freshly signed token together with the claims it encodes.
#[derive(Clone)]
pub struct IssuedToken {
    /// Compact JWS serialization, handed to the client.
    pub token: String,
    /// The claims signed into `token`.
    pub claims: Claims,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails if the token lifetime is zero or longer than
    /// [`MAX_TOKEN_TTL_HOURS`].
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let ttl = Some(config.token_ttl_hours)
            .filter(|h| (1..=MAX_TOKEN_TTL_HOURS).contains(h))
            .and_then(|h| i64::try_from(h).ok())
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Invalid token lifetime: {} hours",
                    config.token_ttl_hours
                ))
            })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl,
        })
    }

    /// Token lifetime applied to every issued token.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `subject` valid from now for the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, AppError> {
        let claims = Claims::new(subject, now, self.ttl);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken { token, claims })
    }
}
