//! Builder for single-statement partial updates.
//!
//! Each supplied field becomes one `column = $n` assignment whose value is a
//! bind parameter. Column names come from `&'static str` constants, so the
//! only text pushed into the SQL is known at compile time.

use codelet_core::types::DbId;
use sqlx::{Encode, Postgres, QueryBuilder, Type};

use crate::models::snippet::SnippetPatch;
use crate::stored_code::StoredCode;

/// Failure modes of a partial update.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The patch supplied no fields, so there is nothing to write.
    #[error("no fields to update")]
    NoFields,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Accumulates `column = $n` assignments for one `UPDATE` statement.
pub struct PartialUpdate {
    builder: QueryBuilder<'static, Postgres>,
    assignments: usize,
}

impl PartialUpdate {
    /// Start an `UPDATE <table> SET` statement.
    pub fn new(table: &'static str) -> Self {
        let mut builder = QueryBuilder::new("UPDATE ");
        builder.push(table).push(" SET ");
        Self {
            builder,
            assignments: 0,
        }
    }

    /// Add `column = $n` when `value` is present; skip it otherwise.
    pub fn set<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'static + Encode<'static, Postgres> + Type<Postgres>,
    {
        if let Some(value) = value {
            if self.assignments > 0 {
                self.builder.push(", ");
            }
            self.builder.push(column).push(" = ").push_bind(value);
            self.assignments += 1;
        }
        self
    }

    /// Number of assignments added so far.
    pub fn len(&self) -> usize {
        self.assignments
    }

    pub fn is_empty(&self) -> bool {
        self.assignments == 0
    }

    /// Close the statement with `WHERE <id_column> = $n`.
    ///
    /// Fails with [`UpdateError::NoFields`] instead of emitting a statement
    /// with an empty `SET` list.
    pub fn finish(
        mut self,
        id_column: &'static str,
        id: DbId,
    ) -> Result<QueryBuilder<'static, Postgres>, UpdateError> {
        if self.is_empty() {
            return Err(UpdateError::NoFields);
        }
        self.builder.push(" WHERE ").push(id_column).push(" = ").push_bind(id);
        Ok(self.builder)
    }
}

/// Build the `UPDATE snippets` statement for `patch`, touching only the
/// supplied columns. Code is compressed when the statement binds it.
pub fn build_snippet_update(
    id: DbId,
    patch: &SnippetPatch,
) -> Result<QueryBuilder<'static, Postgres>, UpdateError> {
    let mut update = PartialUpdate::new("snippets");
    update
        .set("language", patch.language.clone())
        .set("title", patch.title.clone())
        .set("code", patch.code.clone().map(StoredCode))
        .set("favorite", patch.favorite)
        .set("private", patch.private)
        .set("tags", patch.tags.clone())
        .set("description", patch.description.clone());
    update.finish("id", id)
}
