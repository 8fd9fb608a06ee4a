use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service_core::{
    axum::{extract::State, response::IntoResponse, Json},
    error::AppError,
};

use crate::{
    dtos::{
        admin::{LoginRequest, LoginResponse},
        MessageResponse,
    },
    services::AuthSession,
    utils::ValidatedJson,
    AppState,
};

pub const REFRESH_COOKIE: &str = "refresh_token";
const REFRESH_COOKIE_PATH: &str = "/api/v1/admin";

fn refresh_cookie(state: &AppState, session: &AuthSession) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, session.tokens.refresh_token.clone()))
        .http_only(true)
        .secure(state.config.security.refresh_cookie_secure)
        .same_site(SameSite::Strict)
        .path(REFRESH_COOKIE_PATH)
        .max_age(time::Duration::seconds(session.tokens.refresh_expires_in))
        .build()
}

fn respond(state: &AppState, jar: CookieJar, session: AuthSession) -> impl IntoResponse {
    let jar = jar.add(refresh_cookie(state, &session));
    let body = LoginResponse {
        access_token: session.tokens.access_token,
        token_type: "Bearer".to_string(),
        expires_in: session.tokens.access_expires_in,
        user: session.user,
    };
    (jar, Json(body))
}

/// Login with username and password
///
/// The refresh token is set as an HttpOnly cookie scoped to the admin routes.
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Too many login attempts", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;
    Ok(respond(&state, jar, session))
}

/// Mint a new access token from the refresh cookie
#[utoipa::path(
    post,
    path = "/api/v1/admin/refresh",
    responses(
        (status = 200, description = "Token refreshed", body = LoginResponse),
        (status = 401, description = "Missing, invalid or expired refresh token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Refresh token is required")))?;

    let session = state.auth_service.refresh(&token).await?;
    Ok(respond(&state, jar, session))
}

/// Clear the refresh cookie
#[utoipa::path(
    post,
    path = "/api/v1/admin/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let mut removal = Cookie::build((REFRESH_COOKIE, ""))
        .http_only(true)
        .secure(state.config.security.refresh_cookie_secure)
        .same_site(SameSite::Strict)
        .path(REFRESH_COOKIE_PATH)
        .build();
    removal.make_removal();

    (jar.add(removal), Json(MessageResponse::new("Logged out successfully")))
}
