//! 核心错误处理模块

use std::any::Any;

use axum::{
    extract::Request,
    http::{header::ALLOW, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use super::repository::{Entity, RepositoryError};

/// 核心错误类型
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// 按实体名生成 "X not found for X Id: <id>"
    pub fn not_found<E: Entity>(id: i64) -> Self {
        ApiError::NotFound(format!("{0} not found for {0} Id: {1}", E::NAME, id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .collect();
        messages.sort();

        ApiError::BadRequest(messages.join(", "))
    }
}

/// 错误只在这里记录状态码，响应体由 [`translate_errors`] 统一生成
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub description: String,
}

impl ErrorMessage {
    pub fn new(err: &ApiError, path: &str) -> Self {
        Self::with_status(err.status(), err.to_string(), path)
    }

    pub fn with_status(status: StatusCode, message: String, path: &str) -> Self {
        Self {
            status_code: status.as_u16(),
            timestamp: Utc::now(),
            message,
            description: format!("uri={}", path),
        }
    }
}

/// 统一错误转换中间件
///
/// 处理器、提取器、fallback 和 panic 处理产生的 [`ApiError`] 都在这里
/// 被转换成 `{statusCode, timestamp, message, description}` 响应体。
/// 路由层直接返回的 405 和超时层返回的 408 没有 [`ApiError`]，按状态码补齐响应体。
pub async fn translate_errors(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let mut response = next.run(req).await;

    let Some(err) = response.extensions_mut().remove::<ApiError>() else {
        return match response.status() {
            StatusCode::METHOD_NOT_ALLOWED | StatusCode::REQUEST_TIMEOUT => {
                render_bare_status(response, &path)
            }
            _ => response,
        };
    };

    if let ApiError::Unexpected(msg) = &err {
        error!("Unexpected error on {}: {}", path, msg);
    }

    let body = ErrorMessage::new(&err, &path);
    (err.status(), axum::Json(body)).into_response()
}

fn render_bare_status(response: Response, path: &str) -> Response {
    let status = response.status();
    let message = status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();

    let mut rendered =
        (status, axum::Json(ErrorMessage::with_status(status, message, path))).into_response();
    if let Some(allow) = response.headers().get(ALLOW) {
        rendered.headers_mut().insert(ALLOW, allow.clone());
    }
    rendered
}

/// 未匹配路由
pub async fn fallback(req: Request) -> ApiError {
    ApiError::NotFound(format!("No route for {} {}", req.method(), req.uri().path()))
}

/// `CatchPanicLayer` 回调，panic 转为 500
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    ApiError::Unexpected(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{middleware, routing::get, Router};
    use axum_test::TestServer;
    use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer};

    async fn missing() -> Result<String, ApiError> {
        Err(ApiError::NotFound("Order not found for Order Id: 999".to_string()))
    }

    async fn broken() -> Result<String, ApiError> {
        Err(ApiError::BadRequest("Bad request".to_string()))
    }

    async fn boom() -> Result<String, ApiError> {
        Err(ApiError::Unexpected("connection refused".to_string()))
    }

    async fn panics() -> String {
        panic!("kaboom")
    }

    async fn slow() -> String {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "done".to_string()
    }

    fn server() -> TestServer {
        let app = Router::new()
            .route("/missing", get(missing))
            .route("/broken", get(broken))
            .route("/boom", get(boom))
            .route("/panics", get(panics))
            .route("/slow", get(slow))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TimeoutLayer::new(Duration::from_millis(50)))
            .layer(middleware::from_fn(translate_errors));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = server().get("/missing").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: ErrorMessage = response.json();
        assert_eq!(body.status_code, 404);
        assert_eq!(body.message, "Order not found for Order Id: 999");
        assert_eq!(body.description, "uri=/missing");
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let response = server().get("/broken").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: ErrorMessage = response.json();
        assert_eq!(body.status_code, 400);
        assert_eq!(body.description, "uri=/broken");
    }

    #[tokio::test]
    async fn test_unexpected_body() {
        let response = server().get("/boom").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = response.json();
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["message"], "connection refused");
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_handle_panic_maps_to_500() {
        let response = handle_panic(Box::new("kaboom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(
            response.extensions().get::<ApiError>(),
            Some(ApiError::Unexpected(msg)) if msg == "kaboom"
        ));
    }

    #[tokio::test]
    async fn test_panic_renders_error_body() {
        let response = server().get("/panics").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorMessage = response.json();
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "kaboom");
        assert_eq!(body.description, "uri=/panics");
    }

    #[tokio::test]
    async fn test_timeout_renders_error_body() {
        let response = server().get("/slow").await;
        response.assert_status(StatusCode::REQUEST_TIMEOUT);

        let body: ErrorMessage = response.json();
        assert_eq!(body.status_code, 408);
        assert_eq!(body.message, "Request Timeout");
        assert_eq!(body.description, "uri=/slow");
    }

    #[tokio::test]
    async fn test_method_not_allowed_renders_error_body() {
        let response = server().post("/missing").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert!(!response.header("allow").is_empty());

        let body: ErrorMessage = response.json();
        assert_eq!(body.status_code, 405);
        assert_eq!(body.message, "Method Not Allowed");
        assert_eq!(body.description, "uri=/missing");
    }
}
