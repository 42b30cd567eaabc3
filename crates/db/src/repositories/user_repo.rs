//! Repository for the `users` table.

use codelet_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, LoginRecord, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, role, password_hash, refresh_token_hash, \
                        last_login, created_at, updated_at";

/// Provides account operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Fails with a `23505` database error on constraint `uq_users_email` or
    /// `uq_users_username` when the account already exists.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, role, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(input.role.as_str())
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Fetch what login needs: id, password hash, and last login time.
    pub async fn find_login_record(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<LoginRecord>, sqlx::Error> {
        sqlx::query_as::<_, LoginRecord>(
            "SELECT id, password_hash, last_login FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Fetch only the password hash of a user.
    pub async fn find_password_hash(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the password hash and revoke the outstanding refresh token in
    /// one statement. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, refresh_token_hash = '' WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
