//! Item API Module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // must be registered before /{id} to avoid path conflicts
        .route("/detail", get(handler::detail))
        .route("/search", get(handler::search))
        .route("/category/{category_id}", get(handler::list_by_category))
        .route(
            "/subcategory/{sub_category_id}",
            get(handler::list_by_subcategory),
        )
        .route("/{id}", patch(handler::update))
}
