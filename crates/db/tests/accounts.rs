//! Integration tests for the user and session repositories.

use chrono::{Duration, Utc};
use codelet_core::roles::Role;
use codelet_db::models::user::CreateUser;
use codelet_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        role: Role::User,
        password_hash: "$argon2id$not-a-real-hash".to_string(),
    }
}

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_starts_without_session(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.role, "user");
    assert_eq!(user.refresh_token_hash, "");
    assert!(user.last_login.is_none());

    let found = UserRepo::find_login_record(&pool, "a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_and_username_violate_uq_constraints(pool: PgPool) {
    UserRepo::create(&pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();

    let err = UserRepo::create(&pool, &new_user("alice2", "a@x.com"))
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_users_email"));

    let err = UserRepo::create(&pool, &new_user("alice", "other@x.com"))
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some("uq_users_username"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_record_lookup(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("bob", "b@x.com"))
        .await
        .unwrap();

    let record = UserRepo::find_login_record(&pool, "b@x.com")
        .await
        .unwrap()
        .expect("record should exist");
    assert_eq!(record.id, user.id);
    assert_eq!(record.password_hash, user.password_hash);
    assert!(record.last_login.is_none());

    assert!(UserRepo::find_login_record(&pool, "nobody@x.com")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_password_revokes_refresh_token(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("carol", "c@x.com"))
        .await
        .unwrap();
    SessionRepo::record_login(&pool, user.id, "digest", Utc::now())
        .await
        .unwrap();

    assert!(UserRepo::update_password(&pool, user.id, "new-hash").await.unwrap());

    let hash = UserRepo::find_password_hash(&pool, user.id).await.unwrap();
    assert_eq!(hash.as_deref(), Some("new-hash"));
    let slot = SessionRepo::find_refresh_token_hash(&pool, user.id)
        .await
        .unwrap();
    assert_eq!(slot.as_deref(), Some(""));

    assert!(!UserRepo::update_password(&pool, user.id + 1000, "x").await.unwrap());
}

// ---------------------------------------------------------------------------
// Session slot
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_login_sets_token_and_timestamp(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("dave", "d@x.com"))
        .await
        .unwrap();
    let at = Utc::now() - Duration::seconds(5);

    assert!(SessionRepo::record_login(&pool, user.id, "first", at).await.unwrap());

    let slot = SessionRepo::find_refresh_token_hash(&pool, user.id)
        .await
        .unwrap();
    assert_eq!(slot.as_deref(), Some("first"));
    let record = UserRepo::find_login_record(&pool, "d@x.com")
        .await
        .unwrap()
        .unwrap();
    let stored = record.last_login.expect("last_login should be set");
    assert!((stored - at).num_milliseconds().abs() < 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_and_revoke_refresh_token(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("erin", "e@x.com"))
        .await
        .unwrap();
    SessionRepo::record_login(&pool, user.id, "first", Utc::now())
        .await
        .unwrap();

    SessionRepo::replace_refresh_token(&pool, user.id, "second")
        .await
        .unwrap();
    let slot = SessionRepo::find_refresh_token_hash(&pool, user.id)
        .await
        .unwrap();
    assert_eq!(slot.as_deref(), Some("second"));

    SessionRepo::revoke(&pool, user.id).await.unwrap();
    let slot = SessionRepo::find_refresh_token_hash(&pool, user.id)
        .await
        .unwrap();
    assert_eq!(slot.as_deref(), Some(""));

    assert!(SessionRepo::find_refresh_token_hash(&pool, user.id + 1000)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_writes_report_missing_user(pool: PgPool) {
    assert!(!SessionRepo::record_login(&pool, 4242, "digest", Utc::now())
        .await
        .unwrap());
    assert!(!SessionRepo::replace_refresh_token(&pool, 4242, "digest")
        .await
        .unwrap());
}
