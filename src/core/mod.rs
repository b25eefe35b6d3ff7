//! 核心层：错误、提取器、中间件、仓储抽象与通用 CRUD 服务

pub mod error;
pub mod extract;
pub mod middleware;
pub mod repository;
pub mod service;
