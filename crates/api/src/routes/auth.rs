//! Route definitions for account endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Account routes, mounted directly under `/api/v1`.
///
/// ```text
/// POST /register         -> register
/// POST /login            -> login
/// GET  /refresh          -> refresh (refresh cookie)
/// POST /logout           -> logout (requires auth)
/// POST /update/password  -> change_password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", get(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/update/password", post(auth::change_password))
}
