//! Handlers for the snippet endpoints.
//!
//! Everything under `/user/snippets` is scoped to the authenticated owner: a
//! snippet owned by someone else is reported as not found.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use codelet_core::error::CoreError;
use codelet_core::snippets::{validate_new_snippet, validate_patch_fields, validate_snippet_id};
use codelet_core::types::DbId;
use codelet_db::models::snippet::{CreateSnippet, Snippet, SnippetPatch, SnippetSummary};
use codelet_db::repositories::SnippetRepo;
use codelet_db::update_builder::UpdateError;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Owner-scoped
// ---------------------------------------------------------------------------

/// POST /api/v1/user/snippets
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateSnippet>,
) -> AppResult<(StatusCode, Json<Snippet>)> {
    validate_new_snippet(&input.language, &input.title, &input.code)?;

    let snippet = SnippetRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::debug!(user_id = auth.user_id, snippet_id = snippet.id, "Snippet created");
    Ok((StatusCode::CREATED, Json(snippet)))
}

/// GET /api/v1/user/snippets?limit=&page=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<Vec<Snippet>>> {
    let page = params.resolve()?;
    let snippets = SnippetRepo::list_by_owner(&state.pool, auth.user_id, page).await?;
    non_empty(snippets, "No snippets found")
}

/// GET /api/v1/user/snippets/all
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Snippet>>> {
    let snippets = SnippetRepo::list_all_by_owner(&state.pool, auth.user_id).await?;
    non_empty(snippets, "No snippets found")
}

/// GET /api/v1/user/snippets/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<SnippetSummary>>> {
    let summaries = SnippetRepo::list_summaries_by_owner(&state.pool, auth.user_id).await?;
    non_empty(summaries, "No snippets found")
}

/// GET /api/v1/user/snippets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Snippet>> {
    validate_snippet_id(id)?;
    let snippet = SnippetRepo::find_by_id_and_owner(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(snippet))
}

/// PUT /api/v1/user/snippets/{id}
///
/// Partial update: only the fields present in the body are written. Returns
/// the snippet as stored afterwards.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<SnippetPatch>,
) -> AppResult<Json<Snippet>> {
    validate_snippet_id(id)?;
    if patch.is_empty() {
        return Err(UpdateError::NoFields.into());
    }
    validate_patch_fields(
        patch.language.as_deref(),
        patch.title.as_deref(),
        patch.code.as_deref(),
    )?;
    ensure_owner(&state, id, auth.user_id).await?;

    if !SnippetRepo::update(&state.pool, id, &patch).await? {
        return Err(not_found(id));
    }

    let snippet = SnippetRepo::find_by_id_and_owner(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::debug!(user_id = auth.user_id, snippet_id = id, "Snippet updated");
    Ok(Json(snippet))
}

/// DELETE /api/v1/user/snippets/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    validate_snippet_id(id)?;
    ensure_owner(&state, id, auth.user_id).await?;

    if !SnippetRepo::delete_by_id(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(user_id = auth.user_id, snippet_id = id, "Snippet deleted");
    Ok(Json(MessageResponse::new("Snippet deleted")))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/public/snippets?limit=&page=
pub async fn list_public(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<Vec<Snippet>>> {
    let page = params.resolve()?;
    let snippets = SnippetRepo::list_public(&state.pool, page).await?;
    non_empty(snippets, "No public snippets found")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Snippet",
        id,
    })
}

/// An empty listing is a 404, distinct from a failed query.
fn non_empty<T>(items: Vec<T>, message: &str) -> AppResult<Json<Vec<T>>> {
    if items.is_empty() {
        return Err(AppError::Core(CoreError::NoResults(message.to_string())));
    }
    Ok(Json(items))
}

/// 404 unless `user_id` owns snippet `id`.
async fn ensure_owner(state: &AppState, id: DbId, user_id: DbId) -> AppResult<()> {
    match SnippetRepo::owner_of(&state.pool, id).await? {
        Some(owner) if owner == user_id => Ok(()),
        _ => Err(not_found(id)),
    }
}
