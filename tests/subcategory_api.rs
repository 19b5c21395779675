mod common;

use axum::http::StatusCode;
use common::{app, get, id_of, patch, post};
use serde_json::json;

async fn seed_category(app: &axum::Router, name: &str, body: serde_json::Value) -> String {
    let mut payload = body;
    payload["name"] = json!(name);
    let (status, created) = post(app, "/api/categories", payload).await;
    assert_eq!(status, StatusCode::CREATED);
    id_of(&created)
}

#[tokio::test]
async fn create_stores_only_explicit_tax_fields() {
    let app = app().await;
    let cat_id = seed_category(
        &app,
        "Beverages",
        json!({"taxApplicability": true, "tax": 5.0}),
    )
    .await;

    let (status, body) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": cat_id, "name": "Hot Drinks"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Sub-category created successfully."));
    assert_eq!(body["data"]["category"], json!(cat_id));
    // nothing explicit was given, so nothing is stored; items inherit later
    assert!(body["data"]["taxApplicability"].is_null());
    assert!(body["data"]["tax"].is_null());
}

#[tokio::test]
async fn create_under_missing_category_is_not_found() {
    let app = app().await;

    let (status, body) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": "category:missing", "name": "Hot Drinks"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Category not found."));
}

#[tokio::test]
async fn duplicate_name_is_scoped_to_the_category() {
    let app = app().await;
    let beverages = seed_category(&app, "Beverages", json!({})).await;
    let desserts = seed_category(&app, "Desserts", json!({})).await;

    let (status, _) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": beverages, "name": "Specials"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": beverages, "name": "SPECIALS"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        json!("Sub-category with the same name already exists in this category.")
    );

    // the same name in another category is fine
    let (status, _) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": desserts, "name": "Specials"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn list_by_category_returns_only_its_subcategories() {
    let app = app().await;
    let beverages = seed_category(&app, "Beverages", json!({})).await;
    let desserts = seed_category(&app, "Desserts", json!({})).await;

    post(
        &app,
        "/api/subcategories",
        json!({"categoryId": beverages, "name": "Hot Drinks"}),
    )
    .await;
    post(
        &app,
        "/api/subcategories",
        json!({"categoryId": desserts, "name": "Cakes"}),
    )
    .await;

    let (status, body) = get(&app, &format!("/api/subcategories/category/{beverages}")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|s| s["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Hot Drinks"]);
}

#[tokio::test]
async fn detail_embeds_items_and_scopes_name_lookup() {
    let app = app().await;
    let beverages = seed_category(&app, "Beverages", json!({})).await;
    let desserts = seed_category(&app, "Desserts", json!({})).await;

    let (_, sub) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": beverages, "name": "Specials"}),
    )
    .await;
    let sub_id = id_of(&sub);
    post(
        &app,
        "/api/subcategories",
        json!({"categoryId": desserts, "name": "Specials"}),
    )
    .await;

    post(
        &app,
        "/api/items",
        json!({"categoryId": beverages, "subCategoryId": sub_id, "name": "Latte", "baseAmount": 4.5}),
    )
    .await;

    let (status, body) = get(
        &app,
        &format!("/api/subcategories/detail?name=specials&categoryId={beverages}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(sub_id));
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let (status, by_id) = get(&app, &format!("/api/subcategories/detail?id={sub_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["data"]["id"], json!(sub_id));
}

#[tokio::test]
async fn update_override_becomes_explicit() {
    let app = app().await;
    let cat_id = seed_category(
        &app,
        "Beverages",
        json!({"taxApplicability": true, "tax": 5.0}),
    )
    .await;

    let (_, sub) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": cat_id, "name": "Hot Drinks"}),
    )
    .await;
    let sub_id = id_of(&sub);

    let (status, body) = patch(
        &app,
        &format!("/api/subcategories/{sub_id}"),
        json!({"tax": 2.5}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["taxApplicability"], json!(true));
    assert_eq!(body["data"]["tax"], json!(2.5));
}

#[tokio::test]
async fn update_tax_while_not_applicable_is_rejected() {
    let app = app().await;
    let cat_id = seed_category(&app, "Beverages", json!({})).await;

    let (_, sub) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": cat_id, "name": "Hot Drinks"}),
    )
    .await;
    let sub_id = id_of(&sub);

    let (status, body) = patch(
        &app,
        &format!("/api/subcategories/{sub_id}"),
        json!({"tax": 3.0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Tax cannot be set when tax applicability is false.")
    );
}

#[tokio::test]
async fn update_flip_off_forces_zero_tax() {
    let app = app().await;
    let cat_id = seed_category(
        &app,
        "Beverages",
        json!({"taxApplicability": true, "tax": 5.0}),
    )
    .await;

    let (_, sub) = post(
        &app,
        "/api/subcategories",
        json!({"categoryId": cat_id, "name": "Hot Drinks", "tax": 9.0}),
    )
    .await;
    let sub_id = id_of(&sub);

    let (status, body) = patch(
        &app,
        &format!("/api/subcategories/{sub_id}"),
        json!({"taxApplicability": false}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["taxApplicability"], json!(false));
    assert_eq!(body["data"]["tax"], json!(0.0));
}

#[tokio::test]
async fn update_unknown_subcategory_is_not_found() {
    let app = app().await;

    let (status, body) = patch(
        &app,
        "/api/subcategories/subcategory:missing",
        json!({"name": "Whatever"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Sub-category not found."));
}
