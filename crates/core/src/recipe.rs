//! Recipe payload validation.
//!
//! Converts an untrusted JSON request body into a typed [`RecipeInput`].
//! Scalars are coerced leniently (numeric strings are accepted for numbers),
//! ingredient names are trimmed and truncated, and the resulting structs are
//! checked against their length limits before anything reaches the database.

use serde_json::{Map, Value};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits and defaults
// ---------------------------------------------------------------------------

/// Maximum length (in characters) of a recipe name.
pub const MAX_RECIPE_NAME_LEN: usize = 255;
/// Maximum length (in characters) of an ingredient name; longer names are truncated.
pub const MAX_INGREDIENT_NAME_LEN: usize = 255;
/// Servings assumed when the payload omits them.
pub const DEFAULT_SERVINGS: i32 = 1;

// ---------------------------------------------------------------------------
// Validated input types
// ---------------------------------------------------------------------------

/// A validated recipe create/update payload.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 255, message = "Recipe name must be 1-255 characters"))]
    pub name: String,
    pub servings: i32,
    /// Ingredients in the order they were submitted.
    #[validate(nested)]
    pub ingredients: Vec<IngredientInput>,
}

/// A validated ingredient line. `name` is already trimmed and truncated.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub quantity: f64,
    pub unit_cost: f64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an untyped request body into a [`RecipeInput`].
///
/// A JSON `null` body is treated as an empty object. Every failure is
/// reported as a single [`CoreError::Validation`] message naming the
/// offending field, e.g. `ingredients[2].quantity: expected a number, got a boolean`.
pub fn validate_recipe_payload(payload: &Value) -> Result<RecipeInput, CoreError> {
    let empty = Map::new();
    let obj = match payload {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(invalid(format!(
                "request body must be a JSON object, got {}",
                kind(other)
            )))
        }
    };

    let name = required_string(obj, "name", "name")?.to_string();

    let servings = match obj.get("servings") {
        None => DEFAULT_SERVINGS,
        Some(value) => coerce_int(value).ok_or_else(|| {
            invalid(format!("servings: expected an integer, got {}", kind(value)))
        })?,
    };

    let ingredients = match obj.get("ingredients") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| validate_ingredient(index, item))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(invalid(format!(
                "ingredients: expected a list, got {}",
                kind(other)
            )))
        }
    };

    let input = RecipeInput {
        name,
        servings,
        ingredients,
    };
    input
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))?;
    Ok(input)
}

/// Validate one element of the `ingredients` list.
fn validate_ingredient(index: usize, item: &Value) -> Result<IngredientInput, CoreError> {
    let Value::Object(obj) = item else {
        return Err(invalid(format!(
            "ingredients[{index}]: expected an object, got {}",
            kind(item)
        )));
    };
    let path = |field: &str| format!("ingredients[{index}].{field}");

    let trimmed = required_string(obj, "name", &path("name"))?.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("{}: Name cannot be empty", path("name"))));
    }
    let name = truncate_chars(trimmed, MAX_INGREDIENT_NAME_LEN);

    Ok(IngredientInput {
        name,
        category: optional_string(obj, "category", &path("category"))?,
        unit: optional_string(obj, "unit", &path("unit"))?,
        quantity: number_or_zero(obj, "quantity", &path("quantity"))?,
        unit_cost: number_or_zero(obj, "unit_cost", &path("unit_cost"))?,
    })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn required_string<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, CoreError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s),
        None => Err(invalid(format!("{path}: field required"))),
        Some(other) => Err(invalid(format!(
            "{path}: expected a string, got {}",
            kind(other)
        ))),
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, CoreError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(format!(
            "{path}: expected a string, got {}",
            kind(other)
        ))),
    }
}

fn number_or_zero(obj: &Map<String, Value>, key: &str, path: &str) -> Result<f64, CoreError> {
    match obj.get(key) {
        None => Ok(0.0),
        Some(value) => coerce_float(value)
            .ok_or_else(|| invalid(format!("{path}: expected a number, got {}", kind(value)))),
    }
}

/// Accept a JSON number or a string holding a finite decimal number.
fn coerce_float(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Accept an integer, an integral float, or a string holding an integer.
fn coerce_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).ok();
            }
            let f = n.as_f64()?;
            let in_range = f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX);
            (f.fract() == 0.0 && in_range).then_some(f as i32)
        }
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn invalid(message: String) -> CoreError {
    CoreError::Validation(message)
}
