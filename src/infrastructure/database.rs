//! 数据库基础设施
//!
//! PostgreSQL 连接池、建表语句，以及基于 sqlx 的通用仓储实现。

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgPool, PgPoolOptions, PgRow},
    query::Query,
    Error, Postgres, Row,
};
use tracing::info;

use super::config::DatabaseConfig;
use crate::{
    app::{
        order::model::Order,
        order_item::{model::OrderItem, repository::OrderItemRepository},
        product::model::Product,
    },
    core::repository::{Entity, Repository, RepositoryError},
};

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Error> {
        info!(
            "Connecting to database: {}",
            config.url.replace(":password@", ":***@")
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        description TEXT NOT NULL,
        price NUMERIC NOT NULL,
        created TIMESTAMPTZ NOT NULL,
        updated TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        status TEXT NOT NULL,
        created TIMESTAMPTZ NOT NULL,
        updated TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id BIGSERIAL PRIMARY KEY,
        quantity INTEGER NOT NULL,
        created TIMESTAMPTZ NOT NULL,
        updated TIMESTAMPTZ NOT NULL,
        order_id BIGINT NOT NULL REFERENCES orders (id),
        product_id BIGINT NOT NULL REFERENCES products (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS order_items_order_id_idx ON order_items (order_id)",
];

// 创建数据库表
pub async fn create_tables(pool: &PgPool) -> Result<(), Error> {
    info!("Creating database tables...");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database tables created successfully");
    Ok(())
}

/// 实体与表之间的映射
pub trait PgEntity: Entity {
    const TABLE: &'static str;
    /// 不含 WHERE / ORDER BY 的查询语句
    const SELECT: &'static str;
    /// SELECT 中主键列的限定名
    const KEY: &'static str;

    fn from_row(row: &PgRow) -> Result<Self, Error>;

    /// 必须 `RETURNING id`
    fn insert(&self) -> Query<'static, Postgres, PgArguments>;

    fn update(&self, id: i64) -> Query<'static, Postgres, PgArguments>;
}

pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: PgEntity> Repository<E> for PgRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        let sql = format!("{} ORDER BY {}", E::SELECT, E::KEY);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(E::from_row).collect::<Result<Vec<_>, _>>()?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError> {
        let sql = format!("{} WHERE {} = $1", E::SELECT, E::KEY);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(E::from_row).transpose()?)
    }

    async fn save(&self, entity: E) -> Result<E, RepositoryError> {
        let id = match entity.id() {
            Some(id) => {
                entity.update(id).execute(&self.pool).await?;
                id
            }
            None => entity
                .insert()
                .fetch_one(&self.pool)
                .await?
                .try_get::<i64, _>("id")?,
        };

        // 重新读取，OrderItem 需要 join 出关联对象
        self.find_by_id(id)
            .await?
            .ok_or(RepositoryError::Vanished {
                entity: E::NAME,
                id,
            })
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderItemRepository for PgRepository<OrderItem> {
    async fn find_by_order_id(&self, order_id: i64) -> Result<Vec<OrderItem>, RepositoryError> {
        let sql = format!(
            "{} WHERE oi.order_id = $1 ORDER BY {}",
            OrderItem::SELECT,
            OrderItem::KEY
        );
        let rows = sqlx::query(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(OrderItem::from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

fn read_product(row: &PgRow, prefix: &str) -> Result<Product, Error> {
    let col = |name: &str| format!("{}{}", prefix, name);
    Ok(Product {
        id: Some(row.try_get(col("id").as_str())?),
        description: row.try_get(col("description").as_str())?,
        price: row.try_get(col("price").as_str())?,
        created: row.try_get(col("created").as_str())?,
        updated: row.try_get(col("updated").as_str())?,
    })
}

fn read_order(row: &PgRow, prefix: &str) -> Result<Order, Error> {
    let col = |name: &str| format!("{}{}", prefix, name);
    Ok(Order {
        id: Some(row.try_get(col("id").as_str())?),
        status: row.try_get(col("status").as_str())?,
        created: row.try_get(col("created").as_str())?,
        updated: row.try_get(col("updated").as_str())?,
    })
}

impl PgEntity for Product {
    const TABLE: &'static str = "products";
    const SELECT: &'static str = "SELECT id, description, price, created, updated FROM products";
    const KEY: &'static str = "id";

    fn from_row(row: &PgRow) -> Result<Self, Error> {
        read_product(row, "")
    }

    fn insert(&self) -> Query<'static, Postgres, PgArguments> {
        sqlx::query(
            "INSERT INTO products (description, price, created, updated) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(self.description.clone())
        .bind(self.price)
        .bind(self.created)
        .bind(self.updated)
    }

    fn update(&self, id: i64) -> Query<'static, Postgres, PgArguments> {
        sqlx::query(
            "UPDATE products SET description = $1, price = $2, created = $3, updated = $4 \
             WHERE id = $5",
        )
        .bind(self.description.clone())
        .bind(self.price)
        .bind(self.created)
        .bind(self.updated)
        .bind(id)
    }
}

impl PgEntity for Order {
    const TABLE: &'static str = "orders";
    const SELECT: &'static str = "SELECT id, status, created, updated FROM orders";
    const KEY: &'static str = "id";

    fn from_row(row: &PgRow) -> Result<Self, Error> {
        read_order(row, "")
    }

    fn insert(&self) -> Query<'static, Postgres, PgArguments> {
        sqlx::query("INSERT INTO orders (status, created, updated) VALUES ($1, $2, $3) RETURNING id")
            .bind(self.status.clone())
            .bind(self.created)
            .bind(self.updated)
    }

    fn update(&self, id: i64) -> Query<'static, Postgres, PgArguments> {
        sqlx::query("UPDATE orders SET status = $1, created = $2, updated = $3 WHERE id = $4")
            .bind(self.status.clone())
            .bind(self.created)
            .bind(self.updated)
            .bind(id)
    }
}

impl PgEntity for OrderItem {
    const TABLE: &'static str = "order_items";
    const SELECT: &'static str = "SELECT oi.id, oi.quantity, oi.created, oi.updated, \
         o.id AS order_id, o.status AS order_status, \
         o.created AS order_created, o.updated AS order_updated, \
         p.id AS product_id, p.description AS product_description, p.price AS product_price, \
         p.created AS product_created, p.updated AS product_updated \
         FROM order_items oi \
         JOIN orders o ON o.id = oi.order_id \
         JOIN products p ON p.id = oi.product_id";
    const KEY: &'static str = "oi.id";

    fn from_row(row: &PgRow) -> Result<Self, Error> {
        Ok(OrderItem {
            id: Some(row.try_get("id")?),
            quantity: row.try_get("quantity")?,
            created: row.try_get("created")?,
            updated: row.try_get("updated")?,
            order: read_order(row, "order_")?,
            product: read_product(row, "product_")?,
        })
    }

    fn insert(&self) -> Query<'static, Postgres, PgArguments> {
        sqlx::query(
            "INSERT INTO order_items (quantity, created, updated, order_id, product_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(self.quantity)
        .bind(self.created)
        .bind(self.updated)
        .bind(self.order.id)
        .bind(self.product.id)
    }

    fn update(&self, id: i64) -> Query<'static, Postgres, PgArguments> {
        sqlx::query(
            "UPDATE order_items SET quantity = $1, created = $2, updated = $3, \
             order_id = $4, product_id = $5 WHERE id = $6",
        )
        .bind(self.quantity)
        .bind(self.created)
        .bind(self.updated)
        .bind(self.order.id)
        .bind(self.product.id)
        .bind(id)
    }
}
