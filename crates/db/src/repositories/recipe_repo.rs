//! Repository for the `recipes` and `ingredients` tables.
//!
//! A recipe and its ingredients are written as one unit: create and update
//! each run in a single transaction, and an update replaces the whole
//! ingredient list (delete all, then insert in input order).

use sqlx::{PgPool, Postgres, Transaction};
use wechef_core::recipe::{IngredientInput, RecipeInput};
use wechef_core::types::DbId;

use crate::models::ingredient::Ingredient;
use crate::models::recipe::{Recipe, RecipeSummary, RecipeWithIngredients};

/// Column list for `recipes` queries.
const RECIPE_COLUMNS: &str = "id, name, servings, created_at, updated_at";

/// Column list for `ingredients` queries.
const INGREDIENT_COLUMNS: &str = "id, recipe_id, name, category, unit, quantity, unit_cost";

/// Provides data access for recipe aggregates.
pub struct RecipeRepo;

impl RecipeRepo {
    /// List every recipe, most recently updated first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<RecipeSummary>, sqlx::Error> {
        sqlx::query_as::<_, RecipeSummary>(
            "SELECT id, name, updated_at FROM recipes ORDER BY updated_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a recipe with its ingredients.
    ///
    /// Both reads share one repeatable-read snapshot so a concurrent update
    /// can never show up half-applied.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecipeWithIngredients>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let query = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1");
        let Some(recipe) = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE recipe_id = $1 ORDER BY id"
        );
        let ingredients = sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(RecipeWithIngredients::new(recipe, ingredients)))
    }

    /// Create a recipe and all of its ingredients in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &RecipeInput,
    ) -> Result<RecipeWithIngredients, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO recipes (name, servings) VALUES ($1, $2) RETURNING {RECIPE_COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(&input.name)
            .bind(input.servings)
            .fetch_one(&mut *tx)
            .await?;

        let ingredients =
            Self::insert_ingredients_inner(&mut tx, recipe.id, &input.ingredients).await?;

        tx.commit().await?;
        Ok(RecipeWithIngredients::new(recipe, ingredients))
    }

    /// Overwrite a recipe and replace its entire ingredient list.
    ///
    /// Returns `None` (and changes nothing) if no recipe has this id.
    /// Replaced ingredients get fresh ids.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &RecipeInput,
    ) -> Result<Option<RecipeWithIngredients>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE recipes SET \
                 name = $2, \
                 servings = $3, \
                 updated_at = GREATEST(NOW(), created_at) \
             WHERE id = $1 \
             RETURNING {RECIPE_COLUMNS}"
        );
        let Some(recipe) = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.servings)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let removed = sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let ingredients = Self::insert_ingredients_inner(&mut tx, id, &input.ingredients).await?;
        tracing::debug!(
            recipe_id = id,
            removed,
            inserted = ingredients.len(),
            "Replaced recipe ingredients",
        );

        tx.commit().await?;
        Ok(Some(RecipeWithIngredients::new(recipe, ingredients)))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert ingredient rows in input order within an existing transaction.
    async fn insert_ingredients_inner(
        tx: &mut Transaction<'_, Postgres>,
        recipe_id: DbId,
        inputs: &[IngredientInput],
    ) -> Result<Vec<Ingredient>, sqlx::Error> {
        let query = format!(
            "INSERT INTO ingredients (recipe_id, name, category, unit, quantity, unit_cost) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {INGREDIENT_COLUMNS}"
        );

        let mut rows = Vec::with_capacity(inputs.len());
        for input in inputs {
            let row = sqlx::query_as::<_, Ingredient>(&query)
                .bind(recipe_id)
                .bind(&input.name)
                .bind(&input.category)
                .bind(&input.unit)
                .bind(input.quantity)
                .bind(input.unit_cost)
                .fetch_one(&mut **tx)
                .await?;
            rows.push(row);
        }
        Ok(rows)
    }
}
