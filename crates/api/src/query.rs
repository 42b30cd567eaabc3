//! Shared query parameter types for API handlers.

use codelet_core::error::CoreError;
use codelet_core::snippets::Page;
use serde::Deserialize;

/// Pagination parameters (`?limit=&page=`).
///
/// Both are required positive integers; `limit` is capped. A non-integer
/// value is rejected by the query extractor before this type is built.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl PageParams {
    /// Validate and convert into a `LIMIT`/`OFFSET` pair.
    pub fn resolve(&self) -> Result<Page, CoreError> {
        Page::from_params(self.limit, self.page)
    }
}
