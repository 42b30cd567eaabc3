//! Integration tests for the snippet repository and the partial-update builder.

use codelet_core::roles::Role;
use codelet_core::snippets::Page;
use codelet_core::types::DbId;
use codelet_db::models::snippet::{CreateSnippet, SnippetPatch};
use codelet_db::models::user::CreateUser;
use codelet_db::repositories::{SnippetRepo, UserRepo};
use codelet_db::update_builder::UpdateError;
use assert_matches::assert_matches;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, name: &str) -> DbId {
    let input = CreateUser {
        username: name.to_string(),
        email: format!("{name}@x.com"),
        role: Role::User,
        password_hash: "hash".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn snippet(title: &str, private: bool) -> CreateSnippet {
    CreateSnippet {
        language: "go".into(),
        title: title.into(),
        code: "package main\n\nfunc main() {}\n".into(),
        description: "demo".into(),
        private,
        favorite: false,
        tags: vec!["demo".into(), "cli".into()],
    }
}

fn page(limit: i64, page: i64) -> Page {
    Page::from_params(Some(limit), Some(page)).unwrap()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_round_trips_code(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let created = SnippetRepo::create(&pool, owner, &snippet("Hello", false))
        .await
        .unwrap();

    assert_eq!(created.user_id, owner);
    assert_eq!(created.code, "package main\n\nfunc main() {}\n");
    assert_eq!(created.tags, vec!["demo".to_string(), "cli".to_string()]);

    let found = SnippetRepo::find_by_id_and_owner(&pool, created.id, owner)
        .await
        .unwrap()
        .expect("snippet should exist");
    assert_eq!(found.code, created.code);
    assert_eq!(found.title, "Hello");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_code_is_stored_compressed(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let code = "fn main() { println!(\"hi\"); }\n".repeat(40);
    let input = CreateSnippet {
        code: code.clone(),
        ..snippet("Big", false)
    };
    let created = SnippetRepo::create(&pool, owner, &input).await.unwrap();

    let raw: Vec<u8> = sqlx::query_scalar("SELECT code FROM snippets WHERE id = $1")
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(raw, code.as_bytes());
    assert!(raw.len() < code.len());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_corrupt_code_column_fails_to_decode(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let created = SnippetRepo::create(&pool, owner, &snippet("Hello", false))
        .await
        .unwrap();

    sqlx::query("UPDATE snippets SET code = $2 WHERE id = $1")
        .bind(created.id)
        .bind(b"definitely not zstd".to_vec())
        .execute(&pool)
        .await
        .unwrap();

    let result = SnippetRepo::find_by_id_and_owner(&pool, created.id, owner).await;
    assert_matches!(result, Err(sqlx::Error::ColumnDecode { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_is_scoped_to_owner(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let created = SnippetRepo::create(&pool, alice, &snippet("Mine", false))
        .await
        .unwrap();

    assert!(SnippetRepo::find_by_id_and_owner(&pool, created.id, bob)
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        SnippetRepo::owner_of(&pool, created.id).await.unwrap(),
        Some(alice)
    );
    assert_eq!(SnippetRepo::owner_of(&pool, created.id + 100).await.unwrap(), None);
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_owner_pages_in_id_order(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    for i in 0..5 {
        SnippetRepo::create(&pool, owner, &snippet(&format!("s{i}"), false))
            .await
            .unwrap();
    }

    let first = SnippetRepo::list_by_owner(&pool, owner, page(2, 1)).await.unwrap();
    let titles: Vec<_> = first.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["s0", "s1"]);

    let third = SnippetRepo::list_by_owner(&pool, owner, page(2, 3)).await.unwrap();
    let titles: Vec<_> = third.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["s4"]);

    let past_end = SnippetRepo::list_by_owner(&pool, owner, page(2, 4)).await.unwrap();
    assert!(past_end.is_empty());

    let all = SnippetRepo::list_all_by_owner(&pool, owner).await.unwrap();
    assert_eq!(all.len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_public_excludes_private(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    SnippetRepo::create(&pool, alice, &snippet("open", false)).await.unwrap();
    SnippetRepo::create(&pool, alice, &snippet("secret", true)).await.unwrap();
    SnippetRepo::create(&pool, bob, &snippet("bobs", false)).await.unwrap();

    let public = SnippetRepo::list_public(&pool, page(10, 1)).await.unwrap();
    let titles: Vec<_> = public.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["open", "bobs"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summaries_project_four_fields(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let created = SnippetRepo::create(&pool, owner, &snippet("Hello", true))
        .await
        .unwrap();

    let summaries = SnippetRepo::list_summaries_by_owner(&pool, owner).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, created.id);
    assert_eq!(summaries[0].language, "go");
    assert_eq!(summaries[0].title, "Hello");
    assert!(!summaries[0].favorite);
}

// ---------------------------------------------------------------------------
// Partial update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_touches_only_supplied_fields(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let created = SnippetRepo::create(&pool, owner, &snippet("Hello", false))
        .await
        .unwrap();

    let patch = SnippetPatch {
        title: Some("Renamed".into()),
        ..Default::default()
    };
    assert!(SnippetRepo::update(&pool, created.id, &patch).await.unwrap());

    let after = SnippetRepo::find_by_id_and_owner(&pool, created.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.title, "Renamed");
    assert_eq!(after.language, created.language);
    assert_eq!(after.code, created.code);
    assert_eq!(after.description, created.description);
    assert_eq!(after.tags, created.tags);
    assert!(after.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_applies_falsy_values(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let input = CreateSnippet {
        favorite: true,
        ..snippet("Hello", false)
    };
    let created = SnippetRepo::create(&pool, owner, &input).await.unwrap();

    let patch = SnippetPatch {
        favorite: Some(false),
        description: Some(String::new()),
        tags: Some(Vec::new()),
        code: Some("print('new')".into()),
        ..Default::default()
    };
    assert!(SnippetRepo::update(&pool, created.id, &patch).await.unwrap());

    let after = SnippetRepo::find_by_id_and_owner(&pool, created.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert!(!after.favorite);
    assert_eq!(after.description, "");
    assert!(after.tags.is_empty());
    assert_eq!(after.code, "print('new')");
    assert_eq!(after.title, "Hello");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_patch_is_rejected_without_touching_row(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let created = SnippetRepo::create(&pool, owner, &snippet("Hello", false))
        .await
        .unwrap();

    let result = SnippetRepo::update(&pool, created.id, &SnippetPatch::default()).await;
    assert_matches!(result, Err(UpdateError::NoFields));

    let after = SnippetRepo::find_by_id_and_owner(&pool, created.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.updated_at, created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_row_reports_false(pool: PgPool) {
    let patch = SnippetPatch {
        private: Some(true),
        ..Default::default()
    };
    assert!(!SnippetRepo::update(&pool, 999, &patch).await.unwrap());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_row(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let created = SnippetRepo::create(&pool, owner, &snippet("Hello", false))
        .await
        .unwrap();

    assert!(SnippetRepo::delete_by_id(&pool, created.id).await.unwrap());
    assert!(!SnippetRepo::delete_by_id(&pool, created.id).await.unwrap());
    assert!(SnippetRepo::owner_of(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_user_cascades_to_snippets(pool: PgPool) {
    let owner = seed_user(&pool, "alice").await;
    let created = SnippetRepo::create(&pool, owner, &snippet("Hello", false))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(owner)
        .execute(&pool)
        .await
        .unwrap();

    assert!(SnippetRepo::owner_of(&pool, created.id).await.unwrap().is_none());
}
