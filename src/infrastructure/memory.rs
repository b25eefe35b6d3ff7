//! 内存仓储
//!
//! 用于测试和 `--memory` 模式，行为与 PostgreSQL 仓储保持一致：
//! id 从 1 开始递增，列表按 id 升序，订单项读取时带出最新的订单和产品。

use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    app::{
        openapi,
        order::model::Order,
        order_item::{model::OrderItem, repository::OrderItemRepository},
        product::model::Product,
        state::AppState,
    },
    core::repository::{Entity, Repository, RepositoryError},
    infrastructure::config::OpenApiConfig,
};

pub struct MemoryRepository<E> {
    rows: RwLock<BTreeMap<i64, E>>,
    next_id: AtomicI64,
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<E> {
        self.rows.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.rows.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn save(&self, mut entity: E) -> Result<E, RepositoryError> {
        let id = entity
            .id()
            .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst));
        entity.set_id(Some(id));
        self.rows.write().insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.rows.write().remove(&id);
        Ok(())
    }
}

/// 订单项仓储，读取时用订单、产品仓储中的当前值替换快照
pub struct MemoryOrderItemRepository {
    items: MemoryRepository<OrderItem>,
    orders: Arc<MemoryRepository<Order>>,
    products: Arc<MemoryRepository<Product>>,
}

impl MemoryOrderItemRepository {
    pub fn new(
        orders: Arc<MemoryRepository<Order>>,
        products: Arc<MemoryRepository<Product>>,
    ) -> Self {
        Self {
            items: MemoryRepository::new(),
            orders,
            products,
        }
    }

    fn refresh(&self, mut item: OrderItem) -> OrderItem {
        if let Some(order) = item.order.id.and_then(|id| self.orders.get(id)) {
            item.order = order;
        }
        if let Some(product) = item.product.id.and_then(|id| self.products.get(id)) {
            item.product = product;
        }
        item
    }
}

#[async_trait]
impl Repository<OrderItem> for MemoryOrderItemRepository {
    async fn find_all(&self) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = self.items.find_all().await?;
        Ok(items.into_iter().map(|item| self.refresh(item)).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OrderItem>, RepositoryError> {
        Ok(self.items.get(id).map(|item| self.refresh(item)))
    }

    async fn save(&self, entity: OrderItem) -> Result<OrderItem, RepositoryError> {
        let saved = self.items.save(entity).await?;
        Ok(self.refresh(saved))
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.items.delete(id).await
    }
}

#[async_trait]
impl OrderItemRepository for MemoryOrderItemRepository {
    async fn find_by_order_id(&self, order_id: i64) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = self.find_all().await?;
        Ok(items
            .into_iter()
            .filter(|item| item.order.id == Some(order_id))
            .collect())
    }
}

/// 三个内存仓储的组合
#[derive(Clone)]
pub struct MemoryStore {
    pub products: Arc<MemoryRepository<Product>>,
    pub orders: Arc<MemoryRepository<Order>>,
    pub order_items: Arc<MemoryOrderItemRepository>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        let products = Arc::new(MemoryRepository::new());
        let orders = Arc::new(MemoryRepository::new());
        let order_items = Arc::new(MemoryOrderItemRepository::new(
            orders.clone(),
            products.clone(),
        ));
        Self {
            products,
            orders,
            order_items,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_state(&self, openapi_config: &OpenApiConfig) -> AppState {
        AppState::new(
            self.products.clone(),
            self.orders.clone(),
            self.order_items.clone(),
            openapi::document(openapi_config),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::now;
    use rust_decimal::Decimal;

    fn product(description: &str) -> Product {
        let stamp = now();
        Product {
            id: None,
            description: description.to_string(),
            price: Decimal::new(100, 2),
            created: stamp,
            updated: stamp,
        }
    }

    fn order(status: &str) -> Order {
        let stamp = now();
        Order {
            id: None,
            status: status.to_string(),
            created: stamp,
            updated: stamp,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo: MemoryRepository<Product> = MemoryRepository::new();
        let first = repo.save(product("a")).await.unwrap();
        let second = repo.save(product("b")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites() {
        let repo: MemoryRepository<Product> = MemoryRepository::new();
        let mut saved = repo.save(product("a")).await.unwrap();
        saved.description = "b".to_string();
        repo.save(saved).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "b");
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo: MemoryRepository<Order> = MemoryRepository::new();
        let saved = repo.save(order("New")).await.unwrap();
        repo.delete(saved.id.unwrap()).await.unwrap();

        assert!(repo.find_by_id(saved.id.unwrap()).await.unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_order_items_follow_current_order() {
        let store = MemoryStore::new();
        let saved_order = store.orders.save(order("New")).await.unwrap();
        let saved_product = store.products.save(product("Widget")).await.unwrap();

        let stamp = now();
        store
            .order_items
            .save(OrderItem {
                id: None,
                quantity: 2,
                created: stamp,
                updated: stamp,
                order: saved_order.clone(),
                product: saved_product,
            })
            .await
            .unwrap();

        let mut shipped = saved_order.clone();
        shipped.status = "Shipped".to_string();
        store.orders.save(shipped).await.unwrap();

        let items = store
            .order_items
            .find_by_order_id(saved_order.id.unwrap())
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order.status, "Shipped");

        assert!(store.order_items.find_by_order_id(42).await.unwrap().is_empty());
    }
}
