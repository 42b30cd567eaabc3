//! Route definitions for snippets.

use axum::routing::get;
use axum::Router;

use crate::handlers::snippets;
use crate::state::AppState;

/// Routes mounted at `/user/snippets` (all require auth).
///
/// ```text
/// GET    /          -> list (?limit=&page=)
/// POST   /          -> create
/// GET    /all       -> list_all
/// GET    /summary   -> summary
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn owner_router() -> Router<AppState> {
    Router::new()
        .route("/", get(snippets::list).post(snippets::create))
        .route("/all", get(snippets::list_all))
        .route("/summary", get(snippets::summary))
        .route(
            "/{id}",
            get(snippets::get_by_id)
                .put(snippets::update)
                .delete(snippets::delete),
        )
}

/// Routes mounted at `/public/snippets`.
///
/// ```text
/// GET /   -> list_public (?limit=&page=)
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(snippets::list_public))
}
