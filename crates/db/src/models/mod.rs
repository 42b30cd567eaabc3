//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database row
//! plus the DTOs used to create or patch it.

pub mod snippet;
pub mod user;
