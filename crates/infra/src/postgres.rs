//! Postgres adapters for the catalog, order, and session ports.
//!
//! The order/items write pair is wrapped in a transaction on the item
//! side; the checkout runner still compensates with `delete_order` if the
//! item batch fails after the order row committed.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

use beltline_auth::Principal;
use beltline_cart::Cart;
use beltline_catalog::Product;
use beltline_core::{OrderId, ProductId, SessionId};
use beltline_orders::{NewOrderItem, Order, OrderItem, OrderStatus};

use crate::catalog_store::CatalogReader;
use crate::error::StoreError;
use crate::order_store::OrderStore;
use crate::session_store::{SessionRecord, SessionStore};

pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    PgPool::connect(database_url).await.map_err(Into::into)
}

/// Create the storefront tables when they do not exist yet.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS products (
            id BIGINT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            specs TEXT NOT NULL DEFAULT '',
            price_cents BIGINT NOT NULL CHECK (price_cents >= 0),
            image TEXT NOT NULL DEFAULT ''
        )",
        "CREATE TABLE IF NOT EXISTS orders (
            id BIGSERIAL PRIMARY KEY,
            total_cents BIGINT NOT NULL CHECK (total_cents >= 0),
            status TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
        "CREATE TABLE IF NOT EXISTS order_items (
            order_id BIGINT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
            product_id BIGINT NOT NULL,
            quantity BIGINT NOT NULL CHECK (quantity > 0),
            unit_price_cents BIGINT NOT NULL CHECK (unit_price_cents >= 0)
        )",
        "CREATE TABLE IF NOT EXISTS sessions (
            id UUID PRIMARY KEY,
            record JSONB NOT NULL
        )",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Insert the demo catalog when the products table is empty.
pub async fn seed_demo_catalog(pool: &PgPool) -> Result<(), StoreError> {
    let row = sqlx::query("SELECT count(*) AS count FROM products")
        .fetch_one(pool)
        .await?;
    let count: i64 = row
        .try_get("count")
        .map_err(|e| StoreError::serialization(e.to_string()))?;
    if count > 0 {
        return Ok(());
    }

    for product in crate::seed::demo_products() {
        sqlx::query(
            "INSERT INTO products (id, name, description, specs, price_cents, image)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(product.id.as_i64())
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.specs)
        .bind(cents_to_db(product.price_cents)?)
        .bind(&product.image)
        .execute(pool)
        .await?;
    }

    tracing::info!("seeded demo catalog");
    Ok(())
}

fn cents_to_db(value: u64) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::serialization("amount exceeds BIGINT range"))
}

fn cents_from_db(value: i64) -> Result<u64, StoreError> {
    u64::try_from(value).map_err(|_| StoreError::serialization("negative amount in store"))
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let price: i64 = row
        .try_get("price_cents")
        .map_err(|e| StoreError::serialization(e.to_string()))?;
    Ok(Product {
        id: ProductId::from_raw(
            row.try_get("id")
                .map_err(|e| StoreError::serialization(e.to_string()))?,
        ),
        name: row
            .try_get("name")
            .map_err(|e| StoreError::serialization(e.to_string()))?,
        description: row
            .try_get("description")
            .map_err(|e| StoreError::serialization(e.to_string()))?,
        specs: row
            .try_get("specs")
            .map_err(|e| StoreError::serialization(e.to_string()))?,
        price_cents: cents_from_db(price)?,
        image: row
            .try_get("image")
            .map_err(|e| StoreError::serialization(e.to_string()))?,
    })
}

fn order_from_row(row: &PgRow) -> Result<Order, StoreError> {
    let total: i64 = row
        .try_get("total_cents")
        .map_err(|e| StoreError::serialization(e.to_string()))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| StoreError::serialization(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| StoreError::serialization(e.to_string()))?;
    Ok(Order {
        id: OrderId::from_raw(
            row.try_get("id")
                .map_err(|e| StoreError::serialization(e.to_string()))?,
        ),
        total_cents: cents_from_db(total)?,
        status: OrderStatus::from_str(&status)
            .map_err(|e| StoreError::serialization(e.to_string()))?,
        created_at,
    })
}

pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalog {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, description, specs, price_cents, image
             FROM products ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(product_from_row).collect()
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, description, specs, price_cents, image
             FROM products WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn get_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, StoreError> {
        let raw: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
        let rows = sqlx::query(
            "SELECT id, name, description, specs, price_cents, image
             FROM products WHERE id = ANY($1)",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await?;

        let mut found = HashMap::with_capacity(rows.len());
        for row in &rows {
            let product = product_from_row(row)?;
            found.insert(product.id, product);
        }
        Ok(found)
    }
}

pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create_order(
        &self,
        total_cents: u64,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let row = sqlx::query(
            "INSERT INTO orders (total_cents, status)
             VALUES ($1, $2)
             RETURNING id, total_cents, status, created_at",
        )
        .bind(cents_to_db(total_cents)?)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        order_from_row(&row)
    }

    async fn create_order_items(
        &self,
        order_id: OrderId,
        items: &[NewOrderItem],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for item in items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(order_id.as_i64())
            .bind(item.product_id.as_i64())
            .bind(i64::from(item.quantity))
            .bind(cents_to_db(item.unit_price_cents)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
        // ON DELETE CASCADE removes any items.
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            "SELECT id, total_cents, status, created_at FROM orders WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(order_from_row).transpose()
    }

    async fn get_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, StoreError> {
        let rows = sqlx::query(
            "SELECT order_id, product_id, quantity, unit_price_cents
             FROM order_items WHERE order_id = $1",
        )
        .bind(order_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let quantity: i64 = row
                    .try_get("quantity")
                    .map_err(|e| StoreError::serialization(e.to_string()))?;
                let unit_price: i64 = row
                    .try_get("unit_price_cents")
                    .map_err(|e| StoreError::serialization(e.to_string()))?;
                Ok(OrderItem {
                    order_id: OrderId::from_raw(
                        row.try_get("order_id")
                            .map_err(|e| StoreError::serialization(e.to_string()))?,
                    ),
                    product_id: ProductId::from_raw(
                        row.try_get("product_id")
                            .map_err(|e| StoreError::serialization(e.to_string()))?,
                    ),
                    quantity: u32::try_from(quantity)
                        .map_err(|_| StoreError::serialization("quantity out of range"))?,
                    unit_price_cents: cents_from_db(unit_price)?,
                })
            })
            .collect()
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, total_cents, status, created_at
             FROM orders ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(order_from_row).collect()
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load(&self, id: SessionId) -> Result<SessionRecord, StoreError> {
        let row = sqlx::query("SELECT record FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let value: serde_json::Value = row
                    .try_get("record")
                    .map_err(|e| StoreError::serialization(e.to_string()))?;
                serde_json::from_value(value)
                    .map_err(|e| StoreError::serialization(e.to_string()))
            }
            None => Ok(SessionRecord::default()),
        }
    }

    async fn save(&self, id: SessionId, record: &SessionRecord) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(record).map_err(|e| StoreError::serialization(e.to_string()))?;

        sqlx::query(
            "INSERT INTO sessions (id, record) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET record = EXCLUDED.record",
        )
        .bind(id.as_uuid())
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn get_cart(&self, id: SessionId) -> Result<Cart, StoreError> {
        Ok(self.load(id).await?.cart)
    }

    async fn set_cart(&self, id: SessionId, cart: Cart) -> Result<(), StoreError> {
        let mut record = self.load(id).await?;
        record.cart = cart;
        self.save(id, &record).await
    }

    async fn get_principal(&self, id: SessionId) -> Result<Option<Principal>, StoreError> {
        Ok(self.load(id).await?.principal)
    }

    async fn set_principal(
        &self,
        id: SessionId,
        principal: Option<Principal>,
    ) -> Result<(), StoreError> {
        let mut record = self.load(id).await?;
        record.principal = principal;
        self.save(id, &record).await
    }
}
