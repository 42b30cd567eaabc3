//! Request handlers.
//!
//! Handlers validate input at the boundary, delegate to the auth service or
//! the repositories in `codelet_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod snippets;
