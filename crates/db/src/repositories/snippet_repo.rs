//! Repository for the `snippets` table.
//!
//! Code is bound and selected through [`StoredCode`], so every method here
//! deals in plain text while the column holds zstd-compressed bytes.

use codelet_core::snippets::Page;
use codelet_core::types::DbId;
use sqlx::PgPool;

use crate::models::snippet::{CreateSnippet, Snippet, SnippetPatch, SnippetSummary};
use crate::stored_code::StoredCode;
use crate::update_builder::{build_snippet_update, UpdateError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, language, title, code, description, private, favorite, \
                        tags, created_at, updated_at";

/// Provides CRUD and listing operations for snippets.
pub struct SnippetRepo;

impl SnippetRepo {
    /// Insert a snippet owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSnippet,
    ) -> Result<Snippet, sqlx::Error> {
        let query = format!(
            "INSERT INTO snippets
                (user_id, language, title, code, description, private, favorite, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Snippet>(&query)
            .bind(user_id)
            .bind(&input.language)
            .bind(&input.title)
            .bind(StoredCode(input.code.clone()))
            .bind(&input.description)
            .bind(input.private)
            .bind(input.favorite)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// One page of a user's snippets, oldest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: DbId,
        page: Page,
    ) -> Result<Vec<Snippet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snippets
             WHERE user_id = $1
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Snippet>(&query)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Every snippet a user owns, oldest first.
    pub async fn list_all_by_owner(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Snippet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM snippets WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Snippet>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// One page of public snippets across all users.
    pub async fn list_public(pool: &PgPool, page: Page) -> Result<Vec<Snippet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snippets
             WHERE private = false
             ORDER BY id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Snippet>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Find a snippet by id, but only if `user_id` owns it.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Snippet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM snippets WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Snippet>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Id/language/title/favorite for every snippet a user owns.
    pub async fn list_summaries_by_owner(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SnippetSummary>, sqlx::Error> {
        sqlx::query_as::<_, SnippetSummary>(
            "SELECT id, language, title, favorite FROM snippets WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// The owning user of a snippet, or `None` if it does not exist.
    pub async fn owner_of(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT user_id FROM snippets WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Only the supplied fields are written.
    ///
    /// Not ownership-aware: callers must check [`Self::owner_of`] first.
    /// Returns `true` if the row was updated.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &SnippetPatch,
    ) -> Result<bool, UpdateError> {
        let mut query = build_snippet_update(id, patch)?;
        let result = query.build().execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a snippet by id inside a transaction.
    ///
    /// The transaction rolls back on drop if the delete fails. Returns `true`
    /// if a row was removed.
    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
