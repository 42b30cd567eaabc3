//! Domain types and rules shared by the Codelet database and API crates.
//!
//! Nothing in here touches the network or the database: validation rules,
//! pagination math, role parsing, and the zstd codec used for stored code.

pub mod accounts;
pub mod compression;
pub mod error;
pub mod roles;
pub mod snippets;
pub mod types;
