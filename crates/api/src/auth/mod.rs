//! Authentication primitives and the account workflows built on them.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- the token codec: HS256 access/refresh tokens and digests.
//! - [`cookie`] -- the refresh-token cookie.
//! - [`service`] -- signup, login, refresh, logout, and password change.

pub mod cookie;
pub mod jwt;
pub mod password;
pub mod service;
