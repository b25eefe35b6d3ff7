//! 应用层：三种资源的路由、处理器与模型

use std::time::Duration;

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::{
    error::{fallback, handle_panic, translate_errors, ApiError},
    middleware::request_logging_middleware,
};

pub mod openapi;
pub mod order;
pub mod order_item;
pub mod product;
pub mod state;

pub use state::AppState;

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    state.products.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "store": "connected",
        "timestamp": chrono::Utc::now()
    })))
}

/// 创建路由
///
/// 错误转换层包在 panic 捕获层和超时层外面，panic 产生的 500、超时产生的 408
/// 以及方法不匹配的 405 都使用统一的错误响应体。
pub fn create_routes(state: AppState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .merge(product::routes())
        .merge(order::routes())
        .merge(order_item::routes());

    Router::new()
        .nest("/api", api)
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .route("/health", get(health_check))
        .fallback(fallback)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(translate_errors))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
