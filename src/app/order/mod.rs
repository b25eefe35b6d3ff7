//! 订单资源

use axum::{routing::get, Router};

use super::state::AppState;

pub mod handler;
pub mod model;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handler::list_orders).post(handler::create_order))
        .route(
            "/orders/:id",
            get(handler::get_order)
                .put(handler::update_order)
                .delete(handler::delete_order),
        )
}
