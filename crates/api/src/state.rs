use std::sync::Arc;

use georecord_db::service::{CategoryService, RecordService};
use georecord_db::store::pg::PgStore;

use crate::auth::jwt::JwtChecker;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: georecord_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub jwt: Arc<JwtChecker>,
    pub records: Arc<RecordService>,
    pub categories: Arc<CategoryService>,
}

impl AppState {
    pub fn new(pool: georecord_db::DbPool, config: ServerConfig) -> Self {
        let store = PgStore::new(pool.clone());
        Self {
            jwt: Arc::new(JwtChecker::new(&config.jwt)),
            records: Arc::new(RecordService::new(store.clone())),
            categories: Arc::new(CategoryService::new(store)),
            config: Arc::new(config),
            pool,
        }
    }
}
