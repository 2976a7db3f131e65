//! Recipe models: the bare row, the list projection, and the full aggregate.

use serde::Serialize;
use sqlx::FromRow;
use wechef_core::costing::{self, CostSummary, PricedItem};
use wechef_core::types::{DbId, Timestamp};

use crate::models::ingredient::Ingredient;

/// A row from the `recipes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub name: String,
    pub servings: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight list projection of a recipe.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RecipeSummary {
    pub id: DbId,
    pub name: String,
    pub updated_at: Timestamp,
}

/// A recipe together with its ingredients, ordered by ingredient id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeWithIngredients {
    pub id: DbId,
    pub name: String,
    pub servings: i32,
    pub ingredients: Vec<Ingredient>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RecipeWithIngredients {
    pub fn new(recipe: Recipe, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            servings: recipe.servings,
            ingredients,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }

    /// Price every ingredient line and total the recipe.
    pub fn cost_summary(&self) -> CostSummary {
        costing::summarize(
            self.id,
            self.servings,
            self.ingredients.iter().map(|i| PricedItem {
                ingredient_id: i.id,
                name: &i.name,
                quantity: i.quantity,
                unit_cost: i.unit_cost,
            }),
        )
    }
}
