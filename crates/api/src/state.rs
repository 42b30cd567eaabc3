use std::sync::Arc;

use crate::auth::jwt::TokenCodec;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: codelet_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Token codec built from `config.jwt` at startup.
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(pool: codelet_db::DbPool, config: ServerConfig) -> Self {
        let tokens = Arc::new(TokenCodec::new(&config.jwt));
        Self {
            pool,
            config: Arc::new(config),
            tokens,
        }
    }
}
