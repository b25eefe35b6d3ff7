//! 订单项仓储

use async_trait::async_trait;

use super::model::OrderItem;
use crate::core::repository::{Repository, RepositoryError};

/// 在通用仓储之外增加按订单 id 查询
#[async_trait]
pub trait OrderItemRepository: Repository<OrderItem> {
    /// 没有匹配时返回空列表
    async fn find_by_order_id(&self, order_id: i64) -> Result<Vec<OrderItem>, RepositoryError>;
}
