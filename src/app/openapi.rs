//! OpenAPI 文档

use axum::{extract::State, response::Json};
use utoipa::{
    openapi::{self, server::ServerBuilder},
    OpenApi,
};

use super::{
    order::{self, model::*},
    order_item::{self, model::*},
    product::{self, model::*},
    state::AppState,
};
use crate::{core::error::ErrorMessage, infrastructure::config::OpenApiConfig};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "E-commerce Pro API",
        version = "1.0",
        description = "This API exposes endpoints for E-commerce platform",
        contact(
            name = "Splawrence",
            email = "living202@outlook.com",
            url = "https://www.github.com/splawrence"
        ),
        license(
            name = "Apache License, Version 2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    paths(
        product::handler::list_products,
        product::handler::get_product,
        product::handler::create_product,
        product::handler::update_product,
        product::handler::delete_product,
        order::handler::list_orders,
        order::handler::get_order,
        order::handler::create_order,
        order::handler::update_order,
        order::handler::delete_order,
        order_item::handler::list_order_items,
        order_item::handler::get_order_item,
        order_item::handler::list_order_items_by_order,
        order_item::handler::create_order_item,
        order_item::handler::update_order_item,
        order_item::handler::delete_order_item,
    ),
    components(schemas(
        Product,
        CreateProductRequest,
        UpdateProductRequest,
        Order,
        CreateOrderRequest,
        UpdateOrderRequest,
        OrderItem,
        EntityRef,
        CreateOrderItemRequest,
        UpdateOrderItemRequest,
        ErrorMessage,
    )),
    tags(
        (name = "products", description = "Product management"),
        (name = "orders", description = "Order management"),
        (name = "order-items", description = "Order item management")
    )
)]
pub struct ApiDoc;

/// 生成文档并填入开发、生产两个服务器地址
pub fn document(config: &OpenApiConfig) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![
        ServerBuilder::new()
            .url(config.dev_url.clone())
            .description(Some("Development"))
            .build(),
        ServerBuilder::new()
            .url(config.prod_url.clone())
            .description(Some("Production"))
            .build(),
    ]);
    doc
}

pub async fn openapi_json(State(state): State<AppState>) -> Json<openapi::OpenApi> {
    Json(state.openapi.as_ref().clone())
}
