use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use beltline_core::OrderId;
use beltline_orders::{NewOrderItem, Order, OrderItem, OrderStatus};

use crate::error::StoreError;

/// Persistence for orders and their line items.
///
/// `create_order` and `create_order_items` are separate writes; the
/// checkout runner compensates with `delete_order` when the item write
/// fails, so no zero-item order stays visible.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(
        &self,
        total_cents: u64,
        status: OrderStatus,
    ) -> Result<Order, StoreError>;

    async fn create_order_items(
        &self,
        order_id: OrderId,
        items: &[NewOrderItem],
    ) -> Result<(), StoreError>;

    /// Compensation hook: remove an order (and any items) written by a
    /// checkout that subsequently failed.
    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError>;

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    async fn get_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, StoreError>;

    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Overwrite the status of an existing order.
    ///
    /// Fails with `StoreError::NotFound` when the id does not resolve;
    /// nothing is mutated in that case.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<(), StoreError>;
}

/// In-memory order store for dev/tests.
#[derive(Debug)]
pub struct InMemoryOrderStore {
    next_id: AtomicI64,
    orders: RwLock<HashMap<OrderId, Order>>,
    items: RwLock<HashMap<OrderId, Vec<OrderItem>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            orders: RwLock::new(HashMap::new()),
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(
        &self,
        total_cents: u64,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let id = OrderId::from_raw(self.next_id.fetch_add(1, Ordering::SeqCst));
        let order = Order {
            id,
            total_cents,
            status,
            created_at: Utc::now(),
        };

        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::backend("order lock poisoned"))?;
        orders.insert(id, order.clone());
        Ok(order)
    }

    async fn create_order_items(
        &self,
        order_id: OrderId,
        items: &[NewOrderItem],
    ) -> Result<(), StoreError> {
        let mut map = self
            .items
            .write()
            .map_err(|_| StoreError::backend("order lock poisoned"))?;

        let stored = items
            .iter()
            .cloned()
            .map(|item| item.into_order_item(order_id))
            .collect();
        map.insert(order_id, stored);
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::backend("order lock poisoned"))?;
        orders.remove(&id);

        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::backend("order lock poisoned"))?;
        items.remove(&id);
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| StoreError::backend("order lock poisoned"))?;
        Ok(orders.get(&id).cloned())
    }

    async fn get_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::backend("order lock poisoned"))?;
        Ok(items.get(&order_id).cloned().unwrap_or_default())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| StoreError::backend("order lock poisoned"))?;

        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::backend("order lock poisoned"))?;

        match orders.get_mut(&id) {
            Some(order) => {
                order.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beltline_core::ProductId;

    fn item(raw_id: i64, quantity: u32, unit_price_cents: u64) -> NewOrderItem {
        NewOrderItem {
            product_id: ProductId::from_raw(raw_id),
            quantity,
            unit_price_cents,
        }
    }

    #[tokio::test]
    async fn created_order_round_trips_with_its_items() {
        let store = InMemoryOrderStore::new();

        let order = store
            .create_order(28000, OrderStatus::Ordered)
            .await
            .unwrap();
        store
            .create_order_items(order.id, &[item(1, 2, 10000), item(2, 1, 8000)])
            .await
            .unwrap();

        let fetched = store.get_order(order.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_cents, 28000);
        assert_eq!(fetched.status, OrderStatus::Ordered);

        let items = store.get_order_items(order.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.order_id == order.id));
        let sum: u64 = items.iter().map(OrderItem::line_total_cents).sum();
        assert_eq!(sum, fetched.total_cents);
    }

    #[tokio::test]
    async fn update_status_overwrites_existing_orders_only() {
        let store = InMemoryOrderStore::new();
        let order = store.create_order(100, OrderStatus::Ordered).await.unwrap();

        store
            .update_status(order.id, OrderStatus::Shipped)
            .await
            .unwrap();
        let fetched = store.get_order(order.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Shipped);

        let missing = OrderId::from_raw(9999);
        let err = store
            .update_status(missing, OrderStatus::Shipped)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn list_orders_is_newest_first() {
        let store = InMemoryOrderStore::new();
        let first = store.create_order(100, OrderStatus::Ordered).await.unwrap();
        let second = store.create_order(200, OrderStatus::Ordered).await.unwrap();

        let all = store.list_orders().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn delete_order_removes_order_and_items() {
        let store = InMemoryOrderStore::new();
        let order = store.create_order(100, OrderStatus::Ordered).await.unwrap();
        store
            .create_order_items(order.id, &[item(1, 1, 100)])
            .await
            .unwrap();

        store.delete_order(order.id).await.unwrap();

        assert!(store.get_order(order.id).await.unwrap().is_none());
        assert!(store.get_order_items(order.id).await.unwrap().is_empty());
        assert!(store.list_orders().await.unwrap().is_empty());
    }
}
