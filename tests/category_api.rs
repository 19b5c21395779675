mod common;

use axum::http::StatusCode;
use common::{app, get, id_of, patch, post};
use serde_json::json;

#[tokio::test]
async fn create_returns_created_with_defaults() {
    let app = app().await;

    let (status, body) = post(&app, "/api/categories", json!({"name": "Beverages"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Category created successfully."));
    assert_eq!(body["data"]["name"], json!("Beverages"));
    assert_eq!(body["data"]["taxApplicability"], json!(false));
    assert_eq!(body["data"]["tax"], json!(0.0));
    assert!(body["data"]["id"].as_str().is_some());
    assert!(body["data"]["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_name_is_case_insensitive() {
    let app = app().await;

    let (status, _) = post(&app, "/api/categories", json!({"name": "Beverages"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&app, "/api/categories", json!({"name": "beverages"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("Category with the same name already exists.")
    );
}

#[tokio::test]
async fn create_applicable_without_tax_is_rejected() {
    let app = app().await;

    let (status, body) = post(
        &app,
        "/api/categories",
        json!({"name": "Starters", "taxApplicability": true}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Tax is required when tax applicability is true.")
    );
}

#[tokio::test]
async fn create_not_applicable_forces_zero_tax() {
    let app = app().await;

    let (status, body) = post(
        &app,
        "/api/categories",
        json!({"name": "Starters", "taxApplicability": false, "tax": 12.0}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["tax"], json!(0.0));
}

#[tokio::test]
async fn schema_validation_reports_field_errors() {
    let app = app().await;

    let (status, body) = post(&app, "/api/categories", json!({"name": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation failed."));
    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn list_is_sorted_by_name() {
    let app = app().await;
    post(&app, "/api/categories", json!({"name": "Desserts"})).await;
    post(&app, "/api/categories", json!({"name": "Beverages"})).await;

    let (status, body) = get(&app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|c| c["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Beverages", "Desserts"]);
}

#[tokio::test]
async fn detail_embeds_children_and_matches_name_case_insensitively() {
    let app = app().await;

    let (_, cat) = post(
        &app,
        "/api/categories",
        json!({"name": "Beverages", "taxApplicability": true, "tax": 5.0}),
    )
    .await;
    let cat_id = id_of(&cat);

    post(
        &app,
        "/api/subcategories",
        json!({"categoryId": cat_id, "name": "Hot Drinks"}),
    )
    .await;
    post(
        &app,
        "/api/items",
        json!({"categoryId": cat_id, "name": "Latte", "baseAmount": 4.5}),
    )
    .await;

    let (status, body) = get(&app, "/api/categories/detail?name=BEVERAGES").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Beverages"));
    assert_eq!(body["data"]["subCategories"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let (status, by_id) = get(&app, &format!("/api/categories/detail?id={cat_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["data"]["id"], body["data"]["id"]);
}

#[tokio::test]
async fn detail_requires_a_selector() {
    let app = app().await;

    let (status, body) = get(&app, "/api/categories/detail").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Either id or name is required."));
}

#[tokio::test]
async fn detail_unknown_name_is_not_found() {
    let app = app().await;

    let (status, body) = get(&app, "/api/categories/detail?name=nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Category not found."));
}

#[tokio::test]
async fn update_flip_off_forces_zero_tax() {
    let app = app().await;

    let (_, cat) = post(
        &app,
        "/api/categories",
        json!({"name": "Beverages", "taxApplicability": true, "tax": 5.0}),
    )
    .await;
    let cat_id = id_of(&cat);

    let (status, body) = patch(
        &app,
        &format!("/api/categories/{cat_id}"),
        json!({"taxApplicability": false}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Category updated successfully."));
    assert_eq!(body["data"]["taxApplicability"], json!(false));
    assert_eq!(body["data"]["tax"], json!(0.0));
}

#[tokio::test]
async fn update_flip_on_without_tax_is_rejected() {
    let app = app().await;

    let (_, cat) = post(&app, "/api/categories", json!({"name": "Beverages"})).await;
    let cat_id = id_of(&cat);

    let (status, body) = patch(
        &app,
        &format!("/api/categories/{cat_id}"),
        json!({"taxApplicability": true}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Tax is required when tax applicability is true.")
    );
}

#[tokio::test]
async fn update_rename_into_existing_name_conflicts() {
    let app = app().await;

    post(&app, "/api/categories", json!({"name": "Alpha"})).await;
    let (_, beta) = post(&app, "/api/categories", json!({"name": "Beta"})).await;
    let beta_id = id_of(&beta);

    let (status, _) = patch(
        &app,
        &format!("/api/categories/{beta_id}"),
        json!({"name": "ALPHA"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // renaming to a different casing of itself is allowed
    let (status, body) = patch(
        &app,
        &format!("/api/categories/{beta_id}"),
        json!({"name": "BETA"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("BETA"));
}

#[tokio::test]
async fn update_unknown_category_is_not_found() {
    let app = app().await;

    let (status, body) = patch(
        &app,
        "/api/categories/category:missing",
        json!({"name": "Whatever"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Category not found."));
}

#[tokio::test]
async fn concurrent_identical_creates_resolve_to_one_winner() {
    let app = app().await;

    let body = json!({"name": "Beverages"});
    let (first, second) = tokio::join!(
        post(&app, "/api/categories", body.clone()),
        post(&app, "/api/categories", body.clone()),
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app().await;

    let (status, body) = get(&app, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Resource not found."));
}
