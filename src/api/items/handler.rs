//! Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::catalog::{CatalogService, ConsistencyGuard};
use crate::core::ServerState;
use crate::db::models::{Item, ItemCreate, ItemUpdate};
use crate::db::repository::{ItemRepository, SubCategoryRepository};
use crate::utils::{ApiResponse, AppError, AppResult, created, ok};

const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_SEARCH_LIMIT: usize = 100;

/// Lookup selector for the detail endpoint; at least one of `id`/`name`
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub limit: Option<usize>,
}

/// POST /api/items - create an item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Item>>)> {
    payload.validate()?;
    let service = CatalogService::new(state.db.clone());
    let item = service.create_item(payload).await?;
    Ok(created("Item created successfully.", item))
}

/// GET /api/items - list all items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Item>>>> {
    let repo = ItemRepository::new(state.db.clone());
    let items = repo.find_all().await?;
    Ok(ok("Items fetched successfully.", items))
}

/// GET /api/items/search?name=&limit= - case-insensitive substring search
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Item>>>> {
    let needle = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Name query parameter is required."))?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let repo = ItemRepository::new(state.db.clone());
    let items = repo.search(needle, limit).await?;
    Ok(ok("Items fetched successfully.", items))
}

/// GET /api/items/category/{category_id} - items of a category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Item>>>> {
    let guard = ConsistencyGuard::new(state.db.clone());
    let category = guard.category_exists(&category_id).await?;
    let category_ref = category
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Stored category has no id"))?;

    let items = ItemRepository::new(state.db.clone())
        .find_by_category(&category_ref)
        .await?;
    Ok(ok("Items fetched successfully.", items))
}

/// GET /api/items/subcategory/{sub_category_id} - items of a subcategory
pub async fn list_by_subcategory(
    State(state): State<ServerState>,
    Path(sub_category_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Item>>>> {
    let sub_repo = SubCategoryRepository::new(state.db.clone());
    let sub_category = sub_repo
        .find_by_id(&sub_category_id)
        .await?
        .ok_or_else(|| AppError::not_found("Sub-category not found."))?;
    let sub_category_ref = sub_category
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Stored subcategory has no id"))?;

    let items = ItemRepository::new(state.db.clone())
        .find_by_subcategory(&sub_category_ref)
        .await?;
    Ok(ok("Items fetched successfully.", items))
}

/// GET /api/items/detail?id=|name= - one item
pub async fn detail(
    State(state): State<ServerState>,
    Query(query): Query<DetailQuery>,
) -> AppResult<Json<ApiResponse<Item>>> {
    let repo = ItemRepository::new(state.db.clone());
    let item = match (&query.id, &query.name) {
        (Some(id), _) => repo.find_by_id(id).await?,
        (None, Some(name)) => repo.find_by_name_ci(name).await?,
        (None, None) => return Err(AppError::validation("Either id or name is required.")),
    }
    .ok_or_else(|| AppError::not_found("Item not found."))?;

    Ok(ok("Item fetched successfully.", item))
}

/// PATCH /api/items/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<ApiResponse<Item>>> {
    payload.validate()?;
    let service = CatalogService::new(state.db.clone());
    let item = service.update_item(&id, payload).await?;
    Ok(ok("Item updated successfully.", item))
}
