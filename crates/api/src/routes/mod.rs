pub mod health;
pub mod recipe;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health                  liveness probe
///
/// /recipes                 list, create
/// /recipes/{id}            get, replace
/// /recipes/{id}/cost       cost summary
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(recipe::router())
}
