//! Route definitions for recipes.

use axum::routing::get;
use axum::Router;

use crate::handlers::recipe;
use crate::state::AppState;

/// Recipe routes mounted at the root.
///
/// ```text
/// GET  /recipes            -> list_recipes
/// POST /recipes            -> create_recipe
/// GET  /recipes/{id}       -> get_recipe
/// PUT  /recipes/{id}       -> update_recipe
/// GET  /recipes/{id}/cost  -> get_recipe_cost
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            get(recipe::list_recipes).post(recipe::create_recipe),
        )
        .route(
            "/recipes/{id}",
            get(recipe::get_recipe).put(recipe::update_recipe),
        )
        .route("/recipes/{id}/cost", get(recipe::get_recipe_cost))
}
