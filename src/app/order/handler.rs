//! 订单处理器

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::debug;

use super::model::{CreateOrderRequest, Order, UpdateOrderRequest};
use crate::{
    app::state::AppState,
    core::{
        error::ApiError,
        extract::{IdPath, ValidatedJson},
    },
};

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    responses((status = 200, description = "All available Orders", body = [Order]))
)]
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    debug!("list_orders called");
    Ok(Json(state.orders.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, description = "Bad Order Id supplied", body = ErrorMessage),
        (status = 404, description = "Order not found", body = ErrorMessage)
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Order>, ApiError> {
    debug!("get_order called with Order Id: {}", id);
    Ok(Json(state.orders.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order saved", body = Order),
        (status = 400, description = "Bad Order supplied", body = ErrorMessage)
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    debug!("create_order called with {:?}", payload);
    let order = state.orders.create(payload.into_order()).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, description = "Bad Order or Order Id supplied", body = ErrorMessage),
        (status = 404, description = "Order not found", body = ErrorMessage)
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateOrderRequest>,
) -> Result<Json<Order>, ApiError> {
    debug!("update_order called with Order Id: {} and {:?}", id, payload);
    let order = state
        .orders
        .update(id, move |existing| payload.merge(existing))
        .await?;
    Ok(Json(order))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found", body = ErrorMessage)
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    debug!("delete_order called with Order Id: {}", id);
    state.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
