//! 产品资源

use axum::{routing::get, Router};

use super::state::AppState;

pub mod handler;
pub mod model;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
}
