//! Snippet entity model and DTOs.

use codelet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::stored_code::StoredCode;

/// A row from the `snippets` table with its code already decompressed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Snippet {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub language: String,
    pub title: String,
    #[sqlx(try_from = "StoredCode")]
    pub code: String,
    pub description: String,
    pub private: bool,
    pub favorite: bool,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight projection for sidebars and pickers (no code body).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SnippetSummary {
    pub id: DbId,
    pub language: String,
    pub title: String,
    pub favorite: bool,
}

/// DTO for creating a snippet.
///
/// Missing keys default to empty values so that field validation, not the
/// JSON decoder, reports which required field is absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSnippet {
    pub language: String,
    pub title: String,
    pub code: String,
    pub description: String,
    pub private: bool,
    pub favorite: bool,
    pub tags: Vec<String>,
}

/// DTO for a partial update. A `None` field is left untouched.
///
/// A key that is absent or `null` in the request body is `None`; any other
/// value, including `""`, `false` and `[]`, is applied as given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnippetPatch {
    pub language: Option<String>,
    pub title: Option<String>,
    pub code: Option<String>,
    pub favorite: Option<bool>,
    pub private: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
}

impl SnippetPatch {
    /// `true` when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.title.is_none()
            && self.code.is_none()
            && self.favorite.is_none()
            && self.private.is_none()
            && self.tags.is_none()
            && self.description.is_none()
    }
}
