//! 订单项数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    app::{order::model::Order, product::model::Product},
    core::{repository::Entity, service::now},
};

/// 订单项，读取时同时带出所属订单和产品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Option<i64>,
    pub quantity: i32,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub order: Order,
    pub product: Product,
}

impl Entity for OrderItem {
    const NAME: &'static str = "OrderItem";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn set_created(&mut self, at: DateTime<Utc>) {
        self.created = at;
    }

    fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    fn set_updated(&mut self, at: DateTime<Utc>) {
        self.updated = at;
    }
}

/// 请求体中对其他资源的引用，只需要 id
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct EntityRef {
    pub id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItemRequest {
    #[serde(default)]
    pub quantity: i32,
    pub order: EntityRef,
    pub product: EntityRef,
}

impl CreateOrderItemRequest {
    /// 关联的订单和产品必须已经查到
    pub fn into_order_item(self, order: Order, product: Product) -> OrderItem {
        let stamp = now();
        OrderItem {
            id: None,
            quantity: self.quantity,
            created: stamp,
            updated: stamp,
            order,
            product,
        }
    }
}

/// quantity 总是覆盖，缺省为 0
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderItemRequest {
    #[serde(default)]
    pub quantity: i32,
}

impl UpdateOrderItemRequest {
    pub fn merge(self, existing: &OrderItem) -> OrderItem {
        OrderItem {
            quantity: self.quantity,
            ..existing.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(quantity: i32) -> OrderItem {
        let stamp = now();
        OrderItem {
            id: Some(3),
            quantity,
            created: stamp,
            updated: stamp,
            order: Order {
                id: Some(1),
                status: "New".to_string(),
                created: stamp,
                updated: stamp,
            },
            product: Product {
                id: Some(2),
                description: "Widget".to_string(),
                price: Decimal::new(999, 2),
                created: stamp,
                updated: stamp,
            },
        }
    }

    #[test]
    fn test_missing_quantity_resets_to_zero() {
        let update: UpdateOrderItemRequest = serde_json::from_str("{}").unwrap();
        let merged = update.merge(&item(5));
        assert_eq!(merged.quantity, 0);
        assert_eq!(merged.order.id, Some(1));
        assert_eq!(merged.product.id, Some(2));
    }

    #[test]
    fn test_create_request_requires_references() {
        let parsed = serde_json::from_str::<CreateOrderItemRequest>(r#"{"quantity": 2}"#);
        assert!(parsed.is_err());

        let parsed: CreateOrderItemRequest =
            serde_json::from_str(r#"{"quantity": 2, "order": {"id": 1}, "product": {"id": 2}}"#)
                .unwrap();
        assert_eq!(parsed.order.id, 1);
        assert_eq!(parsed.product.id, 2);
    }

    #[test]
    fn test_negative_quantity_overwrites() {
        let request = UpdateOrderItemRequest { quantity: -1 };
        assert!(request.validate().is_ok());
        assert_eq!(request.merge(&item(5)).quantity, -1);
    }
}
