//! 应用状态

use std::sync::Arc;

use super::{
    order::model::Order,
    order_item::{model::OrderItem, repository::OrderItemRepository},
    product::model::Product,
};
use crate::core::{repository::Repository, service::CrudService};

#[derive(Clone)]
pub struct AppState {
    pub products: CrudService<Product>,
    pub orders: CrudService<Order>,
    pub order_items: CrudService<OrderItem>,
    /// 按订单查询订单项
    pub order_item_search: Arc<dyn OrderItemRepository>,
    pub openapi: Arc<utoipa::openapi::OpenApi>,
}

impl AppState {
    pub fn new<P, O, I>(
        products: Arc<P>,
        orders: Arc<O>,
        order_items: Arc<I>,
        openapi: utoipa::openapi::OpenApi,
    ) -> Self
    where
        P: Repository<Product> + 'static,
        O: Repository<Order> + 'static,
        I: OrderItemRepository + 'static,
    {
        Self {
            products: CrudService::new(products),
            orders: CrudService::new(orders),
            order_items: CrudService::new(order_items.clone()),
            order_item_search: order_items,
            openapi: Arc::new(openapi),
        }
    }
}
