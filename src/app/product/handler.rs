//! 产品处理器

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::debug;

use super::model::{CreateProductRequest, Product, UpdateProductRequest};
use crate::{
    app::state::AppState,
    core::{
        error::ApiError,
        extract::{IdPath, ValidatedJson},
    },
};

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses((status = 200, description = "All available Products", body = [Product]))
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    debug!("list_products called");
    Ok(Json(state.products.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Bad Product Id supplied", body = ErrorMessage),
        (status = 404, description = "Product not found", body = ErrorMessage)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Product>, ApiError> {
    debug!("get_product called with Product Id: {}", id);
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product saved", body = Product),
        (status = 400, description = "Bad Product supplied", body = ErrorMessage)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    debug!("create_product called with {:?}", payload);
    let product = state.products.create(payload.into_product()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Bad Product or Product Id supplied", body = ErrorMessage),
        (status = 404, description = "Product not found", body = ErrorMessage)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    debug!("update_product called with Product Id: {} and {:?}", id, payload);
    let product = state
        .products
        .update(id, move |existing| payload.merge(existing))
        .await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorMessage)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    debug!("delete_product called with Product Id: {}", id);
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
