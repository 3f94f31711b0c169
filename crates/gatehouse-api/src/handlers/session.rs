//! Session handlers: check, login, logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;

use gatehouse_auth::Claims;

use crate::cookies;
use crate::dto::request::CredentialsRequest;
use crate::dto::response::ResultResponse;
use crate::error::ApiResult;
use crate::extractors::{SessionToken, ValidatedJson};
use crate::state::AppState;

/// GET /session
pub async fn check(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<Claims>> {
    let claims = state.sessions.check_session(token.as_deref())?;
    Ok(Json(claims))
}

/// POST /session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> ApiResult<(CookieJar, Json<ResultResponse>)> {
    let issued = state.sessions.login(&req.username, &req.password).await?;

    let jar = cookies::with_session(jar, &state.config.auth, issued.token);
    Ok((jar, Json(ResultResponse::success())))
}

/// DELETE /session
///
/// Always succeeds. The token itself stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    token: SessionToken,
) -> (CookieJar, Json<ResultResponse>) {
    state.sessions.logout(token.as_deref());

    let jar = cookies::without_session(jar, &state.config.auth);
    (jar, Json(ResultResponse::success()))
}
