//! Session store: the single refresh-token slot on each `users` row.
//!
//! Only the SHA-256 digest of the live refresh token is stored. An empty
//! string means the user has no usable refresh token.

use codelet_core::types::{DbId, Timestamp};
use sqlx::PgPool;

/// Reads and writes the per-user refresh-token slot.
pub struct SessionRepo;

impl SessionRepo {
    /// Store a freshly issued refresh token and stamp `last_login` atomically.
    ///
    /// Overwrites (and thereby revokes) any previously stored token.
    pub async fn record_login(
        pool: &PgPool,
        user_id: DbId,
        refresh_token_hash: &str,
        at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token_hash = $2, last_login = $3 WHERE id = $1",
        )
        .bind(user_id)
        .bind(refresh_token_hash)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the stored refresh-token digest. `None` if the user is gone.
    pub async fn find_refresh_token_hash(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT refresh_token_hash FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the slot with a rotated token's digest.
    ///
    /// Last writer wins: there is no compare-and-swap against the previous
    /// value.
    pub async fn replace_refresh_token(
        pool: &PgPool,
        user_id: DbId,
        refresh_token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET refresh_token_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(refresh_token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Empty the slot so every outstanding refresh token is rejected.
    pub async fn revoke(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        Self::replace_refresh_token(pool, user_id, "").await
    }
}
