//! User handlers: registration.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;

use crate::cookies;
use crate::dto::request::CredentialsRequest;
use crate::dto::response::ResultResponse;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /users
///
/// Creates the account and signs the caller in with a fresh session cookie.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> ApiResult<(CookieJar, Json<ResultResponse>)> {
    let issued = state.sessions.register(&req.username, &req.password).await?;

    let jar = cookies::with_session(jar, &state.config.auth, issued.token);
    Ok((jar, Json(ResultResponse::success())))
}
