//! 核心服务层模块
//!
//! [`CrudService`] 封装三种资源共用的生命周期：列表、按 id 读取、
//! 创建时打时间戳、选择性合并更新、存在性检查后删除。

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};

use super::{
    error::ApiError,
    repository::{Entity, Repository},
};

/// 当前时间，截断到微秒以匹配数据库精度
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub struct CrudService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: Entity> CrudService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> Result<E, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found::<E>(id))
    }

    /// 忽略调用方给的 id，created 与 updated 都设为当前时间
    pub async fn create(&self, mut entity: E) -> Result<E, ApiError> {
        let stamp = now();
        entity.set_id(None);
        entity.set_created(stamp);
        entity.set_updated(stamp);
        Ok(self.repo.save(entity).await?)
    }

    /// `merge` 根据现有实体构造新实体；id 和 created 始终沿用现有值
    pub async fn update<F>(&self, id: i64, merge: F) -> Result<E, ApiError>
    where
        F: FnOnce(&E) -> E,
    {
        let existing = self.get(id).await?;

        let mut entity = merge(&existing);
        entity.set_id(existing.id());
        entity.set_created(existing.created());
        entity.set_updated(now().max(existing.updated()));

        Ok(self.repo.save(entity).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let existing = self.get(id).await?;
        let id = existing.id().unwrap_or(id);
        Ok(self.repo.delete(id).await?)
    }

    pub async fn ping(&self) -> Result<(), ApiError> {
        Ok(self.repo.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::order::model::Order, infrastructure::memory::MemoryRepository};

    fn service() -> CrudService<Order> {
        CrudService::new(Arc::new(MemoryRepository::<Order>::new()))
    }

    fn order(status: &str) -> Order {
        let stamp = now();
        Order {
            id: Some(99),
            status: status.to_string(),
            created: stamp,
            updated: stamp,
        }
    }

    #[tokio::test]
    async fn test_create_ignores_caller_id_and_stamps() {
        let service = service();
        let created = service.create(order("New")).await.unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(created.created, created.updated);
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_created() {
        let service = service();
        let created = service.create(order("New")).await.unwrap();

        let updated = service
            .update(1, |existing| Order {
                id: Some(500),
                status: "Shipped".to_string(),
                created: existing.created + chrono::Duration::days(1),
                ..existing.clone()
            })
            .await
            .unwrap();

        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.status, "Shipped");
        assert_eq!(updated.created, created.created);
        assert!(updated.updated >= created.updated);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let service = service();

        let err = service.get(999).await.unwrap_err();
        assert!(matches!(&err, ApiError::NotFound(msg) if msg == "Order not found for Order Id: 999"));

        assert!(matches!(
            service.update(999, |existing| existing.clone()).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(service.delete(999).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let service = service();
        service.create(order("New")).await.unwrap();

        service.delete(1).await.unwrap();
        assert!(matches!(service.get(1).await, Err(ApiError::NotFound(_))));
        assert!(service.list().await.unwrap().is_empty());
    }
}
