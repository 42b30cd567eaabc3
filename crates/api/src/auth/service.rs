//! Account workflows: signup, login, refresh-token rotation, logout, and
//! password change.
//!
//! Each workflow validates its input before touching storage, and every
//! write is a single-row statement, so a failed call leaves nothing behind.

use chrono::Utc;
use codelet_core::accounts::{login_cooldown_remaining, require_non_empty, validate_signup};
use codelet_core::error::CoreError;
use codelet_core::types::{DbId, Timestamp};
use codelet_db::models::user::{CreateUser, User};
use codelet_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{hash_refresh_token, TokenKind};
use crate::auth::password::{
    hash_password_blocking, verify_decoy_blocking, verify_password_blocking,
};
use crate::error::{unique_violation, AppError, AppResult};
use crate::state::AppState;

/// A freshly issued access/refresh pair.
#[derive(Debug)]
pub struct IssuedTokens {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub refresh_token: String,
    /// Refresh token lifetime, used as the cookie's `Max-Age`.
    pub refresh_ttl: chrono::Duration,
}

/// Stateless namespace for the account workflows.
pub struct AuthService;

impl AuthService {
    /// Register a new account.
    ///
    /// Fails with `Validation` on a blank field, an invalid email, or an
    /// unknown role, and with `Conflict` when the email or username is taken.
    pub async fn signup(
        state: &AppState,
        username: &str,
        email: &str,
        role: &str,
        password: &str,
    ) -> AppResult<User> {
        let role = validate_signup(username, email, role, password)?;
        let password_hash = hash_password_blocking(password.to_string()).await?;

        let input = CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            role,
            password_hash,
        };

        let user = UserRepo::create(&state.pool, &input).await.map_err(|err| {
            if unique_violation(&err).is_some() {
                AppError::Core(CoreError::Conflict(
                    "An account with this email or username already exists".into(),
                ))
            } else {
                AppError::Database(err)
            }
        })?;

        tracing::info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Exchange email + password for a new token pair.
    ///
    /// The cooldown is checked before the password, so a second login inside
    /// the window is rejected whether or not the password is right.
    pub async fn login(state: &AppState, email: &str, password: &str) -> AppResult<IssuedTokens> {
        require_non_empty("email", email)?;
        require_non_empty("password", password)?;

        let Some(record) = UserRepo::find_login_record(&state.pool, email).await? else {
            verify_decoy_blocking(password.to_string()).await?;
            tracing::warn!("Login rejected: unknown email");
            return Err(CoreError::InvalidCredentials.into());
        };

        let now = Utc::now();
        if let Some(retry_after_secs) = login_cooldown_remaining(record.last_login, now) {
            tracing::warn!(user_id = record.id, retry_after_secs, "Login rejected: cooldown");
            return Err(CoreError::RateLimited { retry_after_secs }.into());
        }

        let valid = verify_password_blocking(password.to_string(), record.password_hash).await?;
        if !valid {
            tracing::warn!(user_id = record.id, "Login rejected: wrong password");
            return Err(CoreError::InvalidCredentials.into());
        }

        let tokens = issue_pair(state, record.id, now)?;
        let stored = SessionRepo::record_login(
            &state.pool,
            record.id,
            &hash_refresh_token(&tokens.refresh_token),
            now,
        )
        .await?;
        if !stored {
            return Err(CoreError::Unauthorized("User no longer exists".into()).into());
        }

        tracing::info!(user_id = record.id, "User logged in");
        Ok(tokens)
    }

    /// Rotate a refresh token: validate it, compare it with the stored
    /// digest, and replace it with a new pair.
    ///
    /// A well-formed token that no longer matches the stored digest (already
    /// rotated, or revoked by logout) is `Forbidden`; everything else wrong
    /// with it is `Unauthorized`.
    pub async fn refresh(state: &AppState, token: Option<&str>) -> AppResult<IssuedTokens> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoreError::Unauthorized("Missing refresh token".into()))?;

        let claims = state.tokens.validate(token)?;
        if claims.kind != TokenKind::Refresh || claims.sub <= 0 {
            return Err(CoreError::Unauthorized("Invalid refresh token".into()).into());
        }
        let user_id = claims.sub;

        let stored = SessionRepo::find_refresh_token_hash(&state.pool, user_id)
            .await?
            .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;

        if stored != hash_refresh_token(token) {
            tracing::warn!(user_id, "Refresh rejected: token is not the current one");
            return Err(CoreError::Forbidden("Refresh token has been revoked".into()).into());
        }

        let tokens = issue_pair(state, user_id, Utc::now())?;
        let stored = SessionRepo::replace_refresh_token(
            &state.pool,
            user_id,
            &hash_refresh_token(&tokens.refresh_token),
        )
        .await?;
        if !stored {
            return Err(CoreError::Unauthorized("User no longer exists".into()).into());
        }

        tracing::debug!(user_id, "Refresh token rotated");
        Ok(tokens)
    }

    /// Revoke the user's refresh token.
    pub async fn logout(state: &AppState, user_id: DbId) -> AppResult<()> {
        SessionRepo::revoke(&state.pool, user_id).await?;
        tracing::info!(user_id, "User logged out");
        Ok(())
    }

    /// Replace the password after checking the current one. Also revokes the
    /// refresh token, so every session has to log in again.
    pub async fn change_password(
        state: &AppState,
        user_id: DbId,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        require_non_empty("old_password", old_password)?;
        require_non_empty("new_password", new_password)?;

        let current_hash = UserRepo::find_password_hash(&state.pool, user_id)
            .await?
            .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;

        let valid = verify_password_blocking(old_password.to_string(), current_hash).await?;
        if !valid {
            tracing::warn!(user_id, "Password change rejected: wrong current password");
            return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
        }

        let new_hash = hash_password_blocking(new_password.to_string()).await?;
        if !UserRepo::update_password(&state.pool, user_id, &new_hash).await? {
            return Err(CoreError::Unauthorized("User no longer exists".into()).into());
        }

        tracing::info!(user_id, "Password changed");
        Ok(())
    }
}

/// Sign an access and a refresh token for `user_id`, both starting at `now`.
fn issue_pair(state: &AppState, user_id: DbId, now: Timestamp) -> AppResult<IssuedTokens> {
    let jwt = &state.config.jwt;

    let access_token = state
        .tokens
        .issue(user_id, TokenKind::Access, now + jwt.access_ttl())?;
    let refresh_token = state
        .tokens
        .issue(user_id, TokenKind::Refresh, now + jwt.refresh_ttl())?;

    Ok(IssuedTokens {
        access_token,
        expires_in: jwt.access_ttl().num_seconds(),
        refresh_token,
        refresh_ttl: jwt.refresh_ttl(),
    })
}
