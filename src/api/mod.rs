//! API Route Modules
//!
//! - [`health`] - liveness and database check
//! - [`categories`] - category management
//! - [`subcategories`] - subcategory management
//! - [`items`] - item management and search

pub mod categories;
pub mod health;
pub mod items;
pub mod subcategories;

use crate::core::ServerState;
use crate::utils::AppError;
use axum::Router;

/// The full application router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(subcategories::router())
        .merge(items::router())
        .fallback(fallback)
}

async fn fallback() -> AppError {
    AppError::not_found("Resource not found.")
}
