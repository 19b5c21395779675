//! SubCategory API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::{CatalogService, ConsistencyGuard};
use crate::core::ServerState;
use crate::db::models::{Item, SubCategory, SubCategoryCreate, SubCategoryUpdate};
use crate::db::repository::{ItemRepository, SubCategoryRepository};
use crate::utils::{ApiResponse, AppError, AppResult, created, ok};

/// Lookup selector for the detail endpoint; at least one of `id`/`name`.
/// `categoryId` narrows a name lookup to one category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailQuery {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category_id: Option<String>,
}

/// SubCategory with its items embedded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryDetail {
    #[serde(flatten)]
    pub sub_category: SubCategory,
    pub items: Vec<Item>,
}

/// POST /api/subcategories - create a subcategory
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SubCategoryCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<SubCategory>>)> {
    payload.validate()?;
    let service = CatalogService::new(state.db.clone());
    let sub_category = service.create_sub_category(payload).await?;
    Ok(created("Sub-category created successfully.", sub_category))
}

/// GET /api/subcategories - list all subcategories
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<SubCategory>>>> {
    let repo = SubCategoryRepository::new(state.db.clone());
    let sub_categories = repo.find_all().await?;
    Ok(ok("Sub-categories fetched successfully.", sub_categories))
}

/// GET /api/subcategories/category/{category_id} - subcategories of a category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<SubCategory>>>> {
    let guard = ConsistencyGuard::new(state.db.clone());
    let category = guard.category_exists(&category_id).await?;
    let category_ref = category
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Stored category has no id"))?;

    let sub_categories = SubCategoryRepository::new(state.db.clone())
        .find_by_category(&category_ref)
        .await?;
    Ok(ok("Sub-categories fetched successfully.", sub_categories))
}

/// GET /api/subcategories/detail?id=|name=|categoryId= - one subcategory
/// with its items
pub async fn detail(
    State(state): State<ServerState>,
    Query(query): Query<DetailQuery>,
) -> AppResult<Json<ApiResponse<SubCategoryDetail>>> {
    let repo = SubCategoryRepository::new(state.db.clone());
    let sub_category = match (&query.id, &query.name) {
        (Some(id), _) => repo.find_by_id(id).await?,
        (None, Some(name)) => match &query.category_id {
            Some(category_id) => {
                let guard = ConsistencyGuard::new(state.db.clone());
                let category = guard.category_exists(category_id).await?;
                let category_ref = category
                    .id
                    .as_ref()
                    .map(|id| id.to_string())
                    .ok_or_else(|| AppError::internal("Stored category has no id"))?;
                repo.find_duplicate(&category_ref, name, None).await?
            }
            None => repo.find_by_name_ci(name).await?,
        },
        (None, None) => return Err(AppError::validation("Either id or name is required.")),
    }
    .ok_or_else(|| AppError::not_found("Sub-category not found."))?;

    let sub_category_ref = sub_category
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("Stored subcategory has no id"))?;
    let items = ItemRepository::new(state.db.clone())
        .find_by_subcategory(&sub_category_ref)
        .await?;

    Ok(ok(
        "Sub-category fetched successfully.",
        SubCategoryDetail {
            sub_category,
            items,
        },
    ))
}

/// PATCH /api/subcategories/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SubCategoryUpdate>,
) -> AppResult<Json<ApiResponse<SubCategory>>> {
    payload.validate()?;
    let service = CatalogService::new(state.db.clone());
    let sub_category = service.update_sub_category(&id, payload).await?;
    Ok(ok("Sub-category updated successfully.", sub_category))
}
