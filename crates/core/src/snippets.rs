//! Snippet rules: required fields, code size limit, and page math.

use crate::error::CoreError;
use crate::types::DbId;

/// Largest accepted code body, in bytes of UTF-8 text (before compression).
pub const MAX_CODE_BYTES: usize = 3072;

/// Largest page size a listing endpoint will serve.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A validated page window, ready to bind as `LIMIT` / `OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build a page window from 1-based `page` and `limit` query values.
    ///
    /// Both must be present and positive, and `limit` may not exceed
    /// [`MAX_PAGE_LIMIT`].
    pub fn from_params(limit: Option<i64>, page: Option<i64>) -> Result<Self, CoreError> {
        let (Some(limit), Some(page)) = (limit, page) else {
            return Err(CoreError::Validation(
                "Missing 'limit' or 'page' parameter".into(),
            ));
        };

        if limit <= 0 || page <= 0 {
            return Err(CoreError::Validation(
                "'limit' and 'page' parameter must be greater than 0".into(),
            ));
        }
        if limit > MAX_PAGE_LIMIT {
            return Err(CoreError::Validation(format!(
                "max 'limit' is {MAX_PAGE_LIMIT}"
            )));
        }

        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| CoreError::Validation("'page' parameter is too large".into()))?;

        Ok(Self { limit, offset })
    }
}

/// Validate a code body: non-empty and within [`MAX_CODE_BYTES`].
pub fn validate_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() {
        return Err(CoreError::Validation("missing code text".into()));
    }
    if code.len() > MAX_CODE_BYTES {
        return Err(CoreError::PayloadTooLarge(format!(
            "code too large ({} bytes, max {MAX_CODE_BYTES})",
            code.len()
        )));
    }
    Ok(())
}

/// Validate the fields required to create a snippet.
pub fn validate_new_snippet(language: &str, title: &str, code: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("missing title".into()));
    }
    if language.is_empty() {
        return Err(CoreError::Validation("missing language".into()));
    }
    validate_code(code)
}

/// Validate the text fields of a partial update.
///
/// Absent fields are fine. Present `language`/`title`/`code` values follow
/// the same rules as on creation; `description` may be cleared to `""`.
pub fn validate_patch_fields(
    language: Option<&str>,
    title: Option<&str>,
    code: Option<&str>,
) -> Result<(), CoreError> {
    if language.is_some_and(str::is_empty) {
        return Err(CoreError::Validation("language cannot be empty".into()));
    }
    if title.is_some_and(str::is_empty) {
        return Err(CoreError::Validation("title cannot be empty".into()));
    }
    if let Some(code) = code {
        validate_code(code)?;
    }
    Ok(())
}

/// Reject snippet ids that no row can have.
pub fn validate_snippet_id(id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(
            "Snippet id must be a positive integer".into(),
        ));
    }
    Ok(())
}
