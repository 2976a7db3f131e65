use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone. Handlers never hold a connection themselves: each
/// repository call checks one out of the pool and returns it before the
/// handler produces its response.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: wechef_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
