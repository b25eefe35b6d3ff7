//! 订单项资源

use axum::{routing::get, Router};

use super::state::AppState;

pub mod handler;
pub mod model;
pub mod repository;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/order-items",
            get(handler::list_order_items).post(handler::create_order_item),
        )
        .route(
            "/order-items/search/order-id/:id",
            get(handler::list_order_items_by_order),
        )
        .route(
            "/order-items/:id",
            get(handler::get_order_item)
                .put(handler::update_order_item)
                .delete(handler::delete_order_item),
        )
}
