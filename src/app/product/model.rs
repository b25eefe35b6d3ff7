//! 产品数据模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::{extract::not_blank, repository::Entity, service::now};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Option<i64>,
    pub description: String,
    pub price: Decimal,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Entity for Product {
    const NAME: &'static str = "Product";

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

// 创建产品请求
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(custom(function = "not_blank", message = "description must not be blank"))]
    pub description: String,
    pub price: Decimal,
}

impl CreateProductRequest {
    pub fn into_product(self) -> Product {
        let stamp = now();
        Product {
            id: None,
            description: self.description,
            price: self.price,
            created: stamp,
            updated: stamp,
        }
    }
}

// 更新产品请求，缺省字段保持原值
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(custom(function = "not_blank", message = "description must not be blank"))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

impl UpdateProductRequest {
    pub fn merge(self, existing: &Product) -> Product {
        Product {
            description: self
                .description
                .unwrap_or_else(|| existing.description.clone()),
            price: self.price.unwrap_or(existing.price),
            ..existing.clone()
        }
    }
}
