//! Ingredient row model.

use serde::Serialize;
use sqlx::FromRow;
use wechef_core::types::DbId;

/// A row from the `ingredients` table.
///
/// `recipe_id` is not serialized: ingredients are only ever rendered nested
/// inside their owning recipe.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Ingredient {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub recipe_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub quantity: f64,
    pub unit_cost: f64,
}
