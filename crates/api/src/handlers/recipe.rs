//! Handlers for recipe CRUD and cost summaries.
//!
//! Orchestration only: extractors validate, `RecipeRepo` persists, and
//! errors map to status codes through [`AppError`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use wechef_core::error::CoreError;
use wechef_core::types::DbId;
use wechef_db::models::recipe::RecipeWithIngredients;
use wechef_db::repositories::RecipeRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{RecipeId, RecipePayload};
use crate::state::AppState;

fn recipe_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Recipe",
        id,
    })
}

async fn load_recipe(state: &AppState, id: DbId) -> AppResult<RecipeWithIngredients> {
    RecipeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| recipe_not_found(id))
}

/// GET /recipes
///
/// List all recipes as `{id, name, updated_at}`, most recently updated first.
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let recipes = RecipeRepo::list_summaries(&state.pool).await?;
    Ok(Json(recipes))
}

/// POST /recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    RecipePayload(input): RecipePayload,
) -> AppResult<impl IntoResponse> {
    let recipe = RecipeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        recipe_id = recipe.id,
        name = %recipe.name,
        ingredient_count = recipe.ingredients.len(),
        "Recipe created",
    );

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// GET /recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    RecipeId(id): RecipeId,
) -> AppResult<impl IntoResponse> {
    let recipe = load_recipe(&state, id).await?;
    Ok(Json(recipe))
}

/// PUT /recipes/{id}
///
/// Overwrite name and servings and replace the whole ingredient list.
pub async fn update_recipe(
    State(state): State<AppState>,
    RecipeId(id): RecipeId,
    RecipePayload(input): RecipePayload,
) -> AppResult<impl IntoResponse> {
    let recipe = RecipeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| recipe_not_found(id))?;

    tracing::info!(
        recipe_id = id,
        ingredient_count = recipe.ingredients.len(),
        "Recipe updated",
    );

    Ok(Json(recipe))
}

/// GET /recipes/{id}/cost
///
/// Line totals, total cost, and cost per serving, truncated to cents.
pub async fn get_recipe_cost(
    State(state): State<AppState>,
    RecipeId(id): RecipeId,
) -> AppResult<impl IntoResponse> {
    let recipe = load_recipe(&state, id).await?;
    Ok(Json(recipe.cost_summary()))
}
