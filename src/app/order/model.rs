//! 订单数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::{extract::not_blank, repository::Entity, service::now};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Option<i64>,
    pub status: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Entity for Order {
    const NAME: &'static str = "Order";

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

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(custom(function = "not_blank", message = "status must not be blank"))]
    pub status: String,
}

impl CreateOrderRequest {
    pub fn into_order(self) -> Order {
        let stamp = now();
        Order {
            id: None,
            status: self.status,
            created: stamp,
            updated: stamp,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[validate(custom(function = "not_blank", message = "status must not be blank"))]
    pub status: Option<String>,
}

impl UpdateOrderRequest {
    pub fn merge(self, existing: &Order) -> Order {
        Order {
            status: self.status.unwrap_or_else(|| existing.status.clone()),
            ..existing.clone()
        }
    }
}
