//! Handlers for account endpoints (register, login, refresh, logout,
//! password change).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use codelet_db::models::user::UserResponse;
use serde::Deserialize;

use crate::auth::cookie::{cleared_refresh_cookie, read_refresh_token, refresh_cookie};
use crate::auth::service::{AuthService, IssuedTokens};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{AccessTokenResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`. Missing keys read as empty so field
/// validation names them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    /// One of `admin`, `user`, `moderator`.
    pub role: String,
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /update/password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/register
///
/// Create an account.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = AuthService::signup(
        &state,
        &input.username,
        &input.email,
        &input.role,
        &input.password,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/login
///
/// Returns the access token in the body and sets the refresh cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<AccessTokenResponse>)> {
    let tokens = AuthService::login(&state, &input.email, &input.password).await?;
    Ok(token_response(jar, tokens))
}

/// GET /api/v1/refresh
///
/// Rotate the refresh cookie and return a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<AccessTokenResponse>)> {
    let presented = read_refresh_token(&jar);
    let tokens = AuthService::refresh(&state, presented.as_deref()).await?;
    Ok(token_response(jar, tokens))
}

/// POST /api/v1/logout
///
/// Revoke the stored refresh token and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    AuthService::logout(&state, auth.user_id).await?;
    Ok((
        jar.add(cleared_refresh_cookie()),
        Json(MessageResponse::new("Logged out")),
    ))
}

/// POST /api/v1/update/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    AuthService::change_password(
        &state,
        auth.user_id,
        &input.old_password,
        &input.new_password,
    )
    .await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn token_response(jar: CookieJar, tokens: IssuedTokens) -> (CookieJar, Json<AccessTokenResponse>) {
    let jar = jar.add(refresh_cookie(tokens.refresh_token, tokens.refresh_ttl));
    let body = AccessTokenResponse {
        access_token: tokens.access_token,
        expires_in: tokens.expires_in,
    };
    (jar, Json(body))
}
