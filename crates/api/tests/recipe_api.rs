//! HTTP-level integration tests for the recipe endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router,
//! with a fresh migrated database per test.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, post_json, put_json, send};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create(pool: &PgPool, body: Value) -> Value {
    let response = post_json(build_test_app(pool.clone()), "/recipes", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

fn ingredient_names(recipe: &Value) -> Vec<String> {
    recipe["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// POST /recipes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_returns_full_aggregate(pool: PgPool) {
    let created = create(
        &pool,
        json!({
            "name": "Soup",
            "servings": 2,
            "ingredients": [{ "name": "Water", "quantity": 1.0, "unit": "L" }]
        }),
    )
    .await;

    assert!(created["id"].is_i64());
    assert_eq!(created["name"], "Soup");
    assert_eq!(created["servings"], 2);
    assert_eq!(created["created_at"], created["updated_at"]);

    let ingredients = created["ingredients"].as_array().unwrap();
    assert_eq!(ingredients.len(), 1);
    let water = &ingredients[0];
    assert!(water["id"].is_i64());
    assert_eq!(water["name"], "Water");
    assert_eq!(water["unit"], "L");
    assert_eq!(water["quantity"], 1.0);
    assert_eq!(water["unit_cost"], 0.0);
    assert!(water["category"].is_null());
    assert!(water.get("recipe_id").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_preserves_ingredient_order(pool: PgPool) {
    let created = create(
        &pool,
        json!({
            "name": "Salad",
            "ingredients": [{ "name": "Lettuce" }, { "name": "Tomato" }, { "name": "Oil" }]
        }),
    )
    .await;

    assert_eq!(created["servings"], 1);
    assert_eq!(ingredient_names(&created), ["Lettuce", "Tomato", "Oil"]);
    assert_eq!(count(&pool, "ingredients").await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_trims_and_truncates_ingredient_names(pool: PgPool) {
    let long = "p".repeat(300);
    let created = create(
        &pool,
        json!({
            "name": "Seasoning",
            "ingredients": [{ "name": "  Salt  " }, { "name": long }]
        }),
    )
    .await;

    let names = ingredient_names(&created);
    assert_eq!(names[0], "Salt");
    assert_eq!(names[1].len(), 255);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_rejects_missing_name_and_empty_ingredient(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/recipes",
        json!({ "ingredients": [{ "name": "" }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert_eq!(count(&pool, "recipes").await, 0);
    assert_eq!(count(&pool, "ingredients").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_rejects_blank_ingredient_name(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/recipes",
        json!({ "name": "Soup", "ingredients": [{ "name": "   " }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "ingredients[0].name: Name cannot be empty");
    assert_eq!(count(&pool, "recipes").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_rejects_non_numeric_quantity(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/recipes",
        json!({ "name": "Soup", "ingredients": [{ "name": "Water", "quantity": "a cup" }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool, "recipes").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_rejects_malformed_json(pool: PgPool) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/recipes")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = send(build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_accepts_json_without_content_type(pool: PgPool) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/recipes")
        .body(Body::from(r#"{"name":"Plain"}"#))
        .unwrap();
    let response = send(build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_recipe_reports_store_rejection_as_400(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/recipes",
        json!({
            "name": "Soup",
            "ingredients": [{ "name": "Water" }, { "name": "Salt", "unit": "u".repeat(80) }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PERSISTENCE_ERROR");
    assert_eq!(count(&pool, "recipes").await, 0);
    assert_eq!(count(&pool, "ingredients").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_body_is_rejected(pool: PgPool) {
    let padding = "x".repeat(3 * 1024 * 1024);
    let response = post_json(
        build_test_app(pool.clone()),
        "/recipes",
        json!({ "name": "Big", "notes": padding }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(count(&pool, "recipes").await, 0);
}

// ---------------------------------------------------------------------------
// GET /recipes/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_recipe_is_stable_across_reads(pool: PgPool) {
    let created = create(
        &pool,
        json!({ "name": "Soup", "ingredients": [{ "name": "Water" }, { "name": "Salt" }] }),
    )
    .await;
    let uri = format!("/recipes/{}", created["id"]);

    let first = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;
    let second = body_json(get(build_test_app(pool), &uri).await).await;

    assert_eq!(first, second);
    assert_eq!(first, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_unknown_recipe_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/recipes/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Recipe with id 999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_recipe_id_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/recipes/soup").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// PUT /recipes/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_recipe_replaces_ingredients(pool: PgPool) {
    let created = create(
        &pool,
        json!({ "name": "Soup", "ingredients": [{ "name": "A" }, { "name": "B" }] }),
    )
    .await;
    let uri = format!("/recipes/{}", created["id"]);

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "name": "Stew", "servings": 4, "ingredients": [{ "name": "C", "unit_cost": 2.5 }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Stew");
    assert_eq!(updated["servings"], 4);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);
    assert_eq!(ingredient_names(&updated), ["C"]);
    assert_eq!(count(&pool, "ingredients").await, 1);

    let fetched = body_json(get(build_test_app(pool), &uri).await).await;
    assert_eq!(fetched, updated);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_no_ingredients_clears_list(pool: PgPool) {
    let created = create(&pool, json!({ "name": "Soup", "ingredients": [{ "name": "A" }] })).await;
    let uri = format!("/recipes/{}", created["id"]);

    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "name": "Soup" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["servings"], 1);
    assert!(updated["ingredients"].as_array().unwrap().is_empty());
    assert_eq!(count(&pool, "ingredients").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_unknown_recipe_returns_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool.clone()),
        "/recipes/999",
        json!({ "name": "Ghost", "ingredients": [{ "name": "Air" }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(count(&pool, "recipes").await, 0);
    assert_eq!(count(&pool, "ingredients").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_update_leaves_recipe_untouched(pool: PgPool) {
    let created = create(&pool, json!({ "name": "Soup", "ingredients": [{ "name": "A" }] })).await;
    let uri = format!("/recipes/{}", created["id"]);

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "name": "Soup", "ingredients": "not a list" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = body_json(get(build_test_app(pool), &uri).await).await;
    assert_eq!(fetched, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_update_write_rolls_back(pool: PgPool) {
    let created = create(&pool, json!({ "name": "Soup", "ingredients": [{ "name": "A" }] })).await;
    let uri = format!("/recipes/{}", created["id"]);

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "name": "Soup", "ingredients": [{ "name": "B", "category": "c".repeat(101) }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = body_json(get(build_test_app(pool), &uri).await).await;
    assert_eq!(fetched, created);
}

// ---------------------------------------------------------------------------
// GET /recipes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_recipes_returns_projection_newest_first(pool: PgPool) {
    let older = create(&pool, json!({ "name": "Older", "ingredients": [{ "name": "A" }] })).await;
    let newer = create(&pool, json!({ "name": "Newer" })).await;

    let response = get(build_test_app(pool.clone()), "/recipes").await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], newer["id"]);
    assert_eq!(items[1]["id"], older["id"]);

    let first = items[0].as_object().unwrap();
    let mut keys: Vec<_> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["id", "name", "updated_at"]);

    // Touching the older recipe moves it to the front.
    let uri = format!("/recipes/{}", older["id"]);
    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "name": "Older" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(get(build_test_app(pool), "/recipes").await).await;
    assert_eq!(list[0]["id"], older["id"]);
    assert_eq!(list[1]["id"], newer["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_recipes_empty_store_returns_empty_list(pool: PgPool) {
    let response = get(build_test_app(pool), "/recipes").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

// ---------------------------------------------------------------------------
// GET /recipes/{id}/cost
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cost_summary_totals_lines(pool: PgPool) {
    let created = create(
        &pool,
        json!({
            "name": "Cake",
            "servings": 3,
            "ingredients": [
                { "name": "Flour", "quantity": 2, "unit_cost": 1.5 },
                { "name": "Butter", "quantity": 0.5, "unit_cost": 14 }
            ]
        }),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!("/recipes/{}/cost", created["id"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cost = body_json(response).await;
    assert_eq!(cost["recipe_id"], created["id"]);
    assert_eq!(cost["servings"], 3);
    assert_eq!(cost["lines"][0]["name"], "Flour");
    assert_eq!(cost["lines"][0]["line_total"], 3.0);
    assert_eq!(cost["lines"][1]["line_total"], 7.0);
    assert_eq!(cost["total_cost"], 10.0);
    assert_eq!(cost["cost_per_serving"], 3.33);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cost_summary_for_unknown_recipe_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/recipes/999/cost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
