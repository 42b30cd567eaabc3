pub mod auth;
pub mod health;
pub mod snippets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                        signup (public)
/// /login                           login (public)
/// /refresh                         rotate refresh cookie (cookie)
/// /logout                          logout (requires auth)
/// /update/password                 change password (requires auth)
///
/// /user/snippets                   list (paged), create
/// /user/snippets/all               list everything owned
/// /user/snippets/summary           id/language/title/favorite projection
/// /user/snippets/{id}              get, update, delete
///
/// /public/snippets                 public listing (paged, no auth)
///
/// /ping                            liveness
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/user/snippets", snippets::owner_router())
        .nest("/public/snippets", snippets::public_router())
        .merge(health::ping_router())
}
