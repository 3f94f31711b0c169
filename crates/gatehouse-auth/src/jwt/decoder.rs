//! Session token validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use gatehouse_core::config::auth::AuthConfig;
use gatehouse_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Why a token was rejected.
///
/// Callers treat every variant as "unauthenticated"; the distinction exists
/// for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The signature does not match the payload under our key and algorithm.
    #[error("token signature is invalid")]
    BadSignature,
    /// The signature is valid but the token is past `exp`.
    #[error("token has expired")]
    Expired,
    /// The token could not be parsed or lacks a required claim.
    #[error("token is malformed")]
    Malformed,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::with_source(ErrorKind::Authentication, "Unauthorized", err)
    }
}

/// Verifies session token signatures and expiry.
///
/// No revocation list is consulted: a correctly signed, unexpired token is
/// accepted even after its holder logged out.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `validate_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validates `token` against the current time.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validates `token` as if the current time were `now`.
    ///
    /// The signature is checked before expiry, so a forged expired token
    /// reports `BadSignature`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?
            .claims;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
