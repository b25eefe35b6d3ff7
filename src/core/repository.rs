//! 通用仓储抽象

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 持久化实体：自动生成的 id 加上审计时间戳
pub trait Entity: Clone + Send + Sync + 'static {
    /// 错误信息中使用的实体名，例如 "Product"
    const NAME: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: Option<i64>);
    fn created(&self) -> DateTime<Utc>;
    fn set_created(&mut self, at: DateTime<Utc>);
    fn updated(&self) -> DateTime<Utc>;
    fn set_updated(&mut self, at: DateTime<Utc>);
}

/// 仓储错误
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{entity} with id {id} disappeared during save")]
    Vanished { entity: &'static str, id: i64 },
}

/// 通用仓储：find-all / find-by-id / save / delete
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// 按 id 升序返回所有行
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError>;

    /// 没有 id 时插入并分配新 id，否则覆盖已有行
    async fn save(&self, entity: E) -> Result<E, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// 存储可达性检查
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
