//! Recipe cost summary: per-line totals, total cost, and cost per serving.
//!
//! Amounts are truncated (not rounded) to [`COST_DECIMALS`] places, and any
//! non-finite intermediate value counts as zero.

use serde::Serialize;

use crate::types::DbId;

/// Number of decimal places kept in reported amounts.
pub const COST_DECIMALS: i32 = 2;

/// One priced ingredient fed into [`summarize`].
#[derive(Debug, Clone, Copy)]
pub struct PricedItem<'a> {
    pub ingredient_id: DbId,
    pub name: &'a str,
    pub quantity: f64,
    pub unit_cost: f64,
}

/// Cost of a single ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLine {
    pub ingredient_id: DbId,
    pub name: String,
    pub line_total: f64,
}

/// Cost breakdown for a whole recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub recipe_id: DbId,
    pub servings: i32,
    pub lines: Vec<CostLine>,
    pub total_cost: f64,
    pub cost_per_serving: f64,
}

/// `quantity * unit_cost`, or zero if either factor or the product is not finite.
pub fn line_total(quantity: f64, unit_cost: f64) -> f64 {
    finite_or_zero(finite_or_zero(quantity) * finite_or_zero(unit_cost))
}

/// Truncate toward zero to `decimals` places.
pub fn truncate(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    finite_or_zero((finite_or_zero(value) * factor).trunc() / factor)
}

/// Build the cost summary for a recipe.
///
/// Totals are accumulated from untruncated line totals; only the reported
/// figures are truncated. Cost per serving is zero when `servings` is zero.
pub fn summarize<'a, I>(recipe_id: DbId, servings: i32, items: I) -> CostSummary
where
    I: IntoIterator<Item = PricedItem<'a>>,
{
    let mut total = 0.0;
    let lines = items
        .into_iter()
        .map(|item| {
            let raw = line_total(item.quantity, item.unit_cost);
            total += raw;
            CostLine {
                ingredient_id: item.ingredient_id,
                name: item.name.to_string(),
                line_total: truncate(raw, COST_DECIMALS),
            }
        })
        .collect();

    let per_serving = if servings == 0 {
        0.0
    } else {
        total / f64::from(servings)
    };

    CostSummary {
        recipe_id,
        servings,
        lines,
        total_cost: truncate(total, COST_DECIMALS),
        cost_per_serving: truncate(per_serving, COST_DECIMALS),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
