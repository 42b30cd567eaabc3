//! User entity model and DTOs.

use codelet_core::roles::Role;
use codelet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and the refresh-token digest -- NEVER serialize
/// this to API responses directly. Use [`UserResponse`] for external output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    /// SHA-256 hex digest of the one live refresh token, or `""` for none.
    pub refresh_token_hash: String,
    pub last_login: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user. The password must already be hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

/// The columns login needs, looked up by email.
#[derive(Debug, Clone, FromRow)]
pub struct LoginRecord {
    pub id: DbId,
    pub password_hash: String,
    pub last_login: Option<Timestamp>,
}
