//! Session cookie construction.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use gatehouse_core::config::auth::AuthConfig;

/// Adds the session cookie carrying `token` to `jar`.
pub fn with_session(jar: CookieJar, config: &AuthConfig, token: String) -> CookieJar {
    let cookie = Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure);

    jar.add(cookie)
}

/// Tells the client to drop its session cookie.
///
/// The removal cookie is sent whether or not the request carried one, so a
/// client that authenticated by header still ends up without a stale cookie.
pub fn without_session(jar: CookieJar, config: &AuthConfig) -> CookieJar {
    let mut cookie = Cookie::build((config.cookie_name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build();
    cookie.make_removal();

    jar.add(cookie)
}
