//! # E-commerce Pro API
//!
//! 产品、订单、订单项三种资源的 CRUD REST 服务：
//! - `core`：错误转换、请求提取器、中间件、通用仓储与 CRUD 服务
//! - `infrastructure`：配置、日志、PostgreSQL 与内存仓储
//! - `app`：各资源的模型、处理器、路由以及 OpenAPI 文档

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{create_routes, AppState};
