//! 订单项处理器

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::debug;

use super::model::{CreateOrderItemRequest, OrderItem, UpdateOrderItemRequest};
use crate::{
    app::state::AppState,
    core::{
        error::ApiError,
        extract::{IdPath, ValidatedJson},
    },
};

#[utoipa::path(
    get,
    path = "/api/order-items",
    tag = "order-items",
    responses((status = 200, description = "All available OrderItems", body = [OrderItem]))
)]
pub async fn list_order_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderItem>>, ApiError> {
    debug!("list_order_items called");
    Ok(Json(state.order_items.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/order-items/{id}",
    tag = "order-items",
    params(("id" = i64, Path, description = "OrderItem id")),
    responses(
        (status = 200, description = "OrderItem found", body = OrderItem),
        (status = 400, description = "Bad OrderItem Id supplied", body = ErrorMessage),
        (status = 404, description = "OrderItem not found", body = ErrorMessage)
    )
)]
pub async fn get_order_item(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<OrderItem>, ApiError> {
    debug!("get_order_item called with OrderItem Id: {}", id);
    Ok(Json(state.order_items.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/order-items/search/order-id/{id}",
    tag = "order-items",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "OrderItems of the Order, possibly empty", body = [OrderItem]),
        (status = 400, description = "Bad Order Id supplied", body = ErrorMessage)
    )
)]
pub async fn list_order_items_by_order(
    State(state): State<AppState>,
    IdPath(order_id): IdPath,
) -> Result<Json<Vec<OrderItem>>, ApiError> {
    debug!("list_order_items_by_order called with Order Id: {}", order_id);
    let items = state.order_item_search.find_by_order_id(order_id).await?;
    Ok(Json(items))
}

/// 先解析关联的产品和订单，任一不存在即 404，不写入任何数据
#[utoipa::path(
    post,
    path = "/api/order-items",
    tag = "order-items",
    request_body = CreateOrderItemRequest,
    responses(
        (status = 201, description = "OrderItem saved", body = OrderItem),
        (status = 400, description = "Bad OrderItem supplied", body = ErrorMessage),
        (status = 404, description = "Referenced Order or Product not found", body = ErrorMessage)
    )
)]
pub async fn create_order_item(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderItemRequest>,
) -> Result<(StatusCode, Json<OrderItem>), ApiError> {
    debug!("create_order_item called with {:?}", payload);
    let product = state.products.get(payload.product.id).await?;
    let order = state.orders.get(payload.order.id).await?;

    let item = state
        .order_items
        .create(payload.into_order_item(order, product))
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/order-items/{id}",
    tag = "order-items",
    params(("id" = i64, Path, description = "OrderItem id")),
    request_body = UpdateOrderItemRequest,
    responses(
        (status = 200, description = "OrderItem updated", body = OrderItem),
        (status = 400, description = "Bad OrderItem or OrderItem Id supplied", body = ErrorMessage),
        (status = 404, description = "OrderItem not found", body = ErrorMessage)
    )
)]
pub async fn update_order_item(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateOrderItemRequest>,
) -> Result<Json<OrderItem>, ApiError> {
    debug!("update_order_item called with OrderItem Id: {} and {:?}", id, payload);
    let item = state
        .order_items
        .update(id, move |existing| payload.merge(existing))
        .await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/order-items/{id}",
    tag = "order-items",
    params(("id" = i64, Path, description = "OrderItem id")),
    responses(
        (status = 204, description = "OrderItem deleted"),
        (status = 404, description = "OrderItem not found", body = ErrorMessage)
    )
)]
pub async fn delete_order_item(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    debug!("delete_order_item called with OrderItem Id: {}", id);
    state.order_items.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
