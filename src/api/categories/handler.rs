//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::CatalogService;
use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate, Item, SubCategory};
use crate::db::repository::{CategoryRepository, ItemRepository, SubCategoryRepository};
use crate::utils::{ApiResponse, AppError, AppResult, created, ok};

/// Lookup selector for the detail endpoint; at least one of `id`/`name`
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Category with its children embedded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub sub_categories: Vec<SubCategory>,
    pub items: Vec<Item>,
}

/// POST /api/categories - create a category
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    payload.validate()?;
    let service = CatalogService::new(state.db.clone());
    let category = service.create_category(payload).await?;
    Ok(created("Category created successfully.", category))
}

/// GET /api/categories - list all categories
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(ok("Categories fetched successfully.", categories))
}

/// GET /api/categories/detail?id=|name= - one category with children
pub async fn detail(
    State(state): State<ServerState>,
    Query(query): Query<DetailQuery>,
) -> AppResult<Json<ApiResponse<CategoryDetail>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = match (&query.id, &query.name) {
        (Some(id), _) => repo.find_by_id(id).await?,
        (None, Some(name)) => repo.find_by_name_ci(name).await?,
        (None, None) => return Err(AppError::validation("Either id or name is required.")),
    }
    .ok_or_else(|| AppError::not_found("Category not found."))?;

    let category_ref = category
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Stored category has no id"))?;
    let sub_categories = SubCategoryRepository::new(state.db.clone())
        .find_by_category(&category_ref)
        .await?;
    let items = ItemRepository::new(state.db.clone())
        .find_by_category(&category_ref)
        .await?;

    Ok(ok(
        "Category fetched successfully.",
        CategoryDetail {
            category,
            sub_categories,
            items,
        },
    ))
}

/// PATCH /api/categories/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<Category>>> {
    payload.validate()?;
    let service = CatalogService::new(state.db.clone());
    let category = service.update_category(&id, payload).await?;
    Ok(ok("Category updated successfully.", category))
}
