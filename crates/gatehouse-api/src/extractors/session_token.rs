//! `SessionToken` extractor: pulls the presented session token, if any, from
//! the session cookie or an `Authorization: Bearer` header.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::state::AppState;

/// The raw token presented by the caller. Absence is not a rejection; the
/// session controller decides what a missing token means.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    /// Borrowed view of the token.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(state.cookie_name()) {
            if !cookie.value().is_empty() {
                return Ok(Self(Some(cookie.value().to_string())));
            }
        }

        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        Ok(Self(bearer))
    }
}
