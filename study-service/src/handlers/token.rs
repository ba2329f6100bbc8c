use crate::dtos::SuccessResponse;
use crate::services::ACCESS_TOKEN_COOKIE;
use crate::startup::AppState;
use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{Map, Value};
use service_core::error::AppError;

/// Signs the posted claims and hands the token back as an HTTP-only,
/// cross-site cookie.
pub async fn issue_access_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<Map<String, Value>>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    let token = state.tokens.issue(payload)?;

    tracing::debug!("Issued access token");

    let jar = jar.add(
        Cookie::build((ACCESS_TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None)
            .build(),
    );

    Ok((jar, Json(SuccessResponse { success: true })))
}
