use std::sync::Arc;

use thiserror::Error;

use beltline_checkout::{CheckoutError, price_cart};
use beltline_core::{ProductId, SessionId};
use beltline_orders::{Order, OrderItem, OrderStatus};

use crate::catalog_store::CatalogReader;
use crate::error::StoreError;
use crate::order_store::OrderStore;
use crate::session_store::SessionStore;

/// The durable outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub items: Vec<OrderItem>,
    /// Cart lines that referenced vanished products and were excluded
    /// from the order.
    pub dropped: Vec<ProductId>,
}

/// Failure of a checkout run. In every case the visitor's cart is left
/// intact and no partially written order remains visible.
#[derive(Debug, Error)]
pub enum CheckoutRunError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("store failure during checkout: {0}")]
    Store(#[from] StoreError),
}

/// Orchestrates one checkout: load the cart, resolve the catalog in one
/// batched read, price, persist, and only then clear the cart.
///
/// The step order is load → resolve → price → persist → clear and must
/// not be reordered: clearing before persistence is confirmed would lose
/// the cart on failure.
pub struct CheckoutRunner {
    catalog: Arc<dyn CatalogReader>,
    orders: Arc<dyn OrderStore>,
    sessions: Arc<dyn SessionStore>,
}

impl CheckoutRunner {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        orders: Arc<dyn OrderStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            catalog,
            orders,
            sessions,
        }
    }

    pub async fn checkout(
        &self,
        session_id: SessionId,
    ) -> Result<CheckoutReceipt, CheckoutRunError> {
        let mut cart = self.sessions.get_cart(session_id).await?;

        let resolved = self.catalog.get_by_ids(&cart.product_ids()).await?;
        let priced = price_cart(&cart, &resolved)?;

        if !priced.dropped.is_empty() {
            tracing::warn!(
                session_id = %session_id,
                dropped = priced.dropped.len(),
                "cart lines referenced unknown products and were dropped"
            );
        }

        let order = self
            .orders
            .create_order(priced.total_cents, OrderStatus::Ordered)
            .await?;

        if let Err(err) = self.orders.create_order_items(order.id, &priced.items).await {
            // Item persistence failed after the order row was written:
            // remove the orphan so no zero-item order is ever retrievable.
            if let Err(cleanup_err) = self.orders.delete_order(order.id).await {
                tracing::error!(
                    order_id = %order.id,
                    error = %cleanup_err,
                    "failed to delete orphan order after item write failure"
                );
            }
            return Err(err.into());
        }

        // Persistence is confirmed; only now may the cart be destroyed.
        cart.clear();
        self.sessions.set_cart(session_id, cart).await?;

        let items = priced
            .items
            .into_iter()
            .map(|item| item.into_order_item(order.id))
            .collect();

        tracing::info!(
            order_id = %order.id,
            total_cents = order.total_cents,
            "checkout completed"
        );

        Ok(CheckoutReceipt {
            order,
            items,
            dropped: priced.dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use beltline_cart::Cart;
    use beltline_catalog::Product;
    use beltline_orders::NewOrderItem;
    use beltline_core::OrderId;

    use super::*;
    use crate::catalog_store::InMemoryCatalog;
    use crate::order_store::InMemoryOrderStore;
    use crate::session_store::InMemorySessionStore;

    fn pid(raw: i64) -> ProductId {
        ProductId::from_raw(raw)
    }

    fn product(raw_id: i64, name: &str, price_cents: u64) -> Product {
        Product {
            id: pid(raw_id),
            name: name.to_string(),
            description: String::new(),
            specs: String::new(),
            price_cents,
            image: String::new(),
        }
    }

    struct Fixture {
        catalog: Arc<InMemoryCatalog>,
        orders: Arc<InMemoryOrderStore>,
        sessions: Arc<InMemorySessionStore>,
        runner: CheckoutRunner,
    }

    fn fixture() -> Fixture {
        let catalog = Arc::new(InMemoryCatalog::with_products(vec![
            product(1, "V-Belt Pulleys", 10000),
            product(2, "Flat Pulleys", 8000),
        ]));
        let orders = Arc::new(InMemoryOrderStore::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let runner = CheckoutRunner::new(catalog.clone(), orders.clone(), sessions.clone());
        Fixture {
            catalog,
            orders,
            sessions,
            runner,
        }
    }

    #[tokio::test]
    async fn checkout_persists_order_and_clears_the_cart() {
        let fx = fixture();
        let session = SessionId::new();

        let mut cart = Cart::new();
        cart.add(pid(1), 2);
        cart.add(pid(2), 1);
        fx.sessions.set_cart(session, cart).await.unwrap();

        let receipt = fx.runner.checkout(session).await.unwrap();

        assert_eq!(receipt.order.total_cents, 28000);
        assert_eq!(receipt.order.status, OrderStatus::Ordered);
        assert_eq!(receipt.items.len(), 2);
        assert!(receipt.dropped.is_empty());

        let stored = fx
            .orders
            .get_order(receipt.order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total_cents, 28000);

        let items = fx.orders.get_order_items(receipt.order.id).await.unwrap();
        let sum: u64 = items.iter().map(OrderItem::line_total_cents).sum();
        assert_eq!(sum, stored.total_cents);

        assert!(fx.sessions.get_cart(session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn order_total_survives_later_catalog_price_changes() {
        let fx = fixture();
        let session = SessionId::new();

        let mut cart = Cart::new();
        cart.add(pid(1), 2);
        fx.sessions.set_cart(session, cart).await.unwrap();

        let receipt = fx.runner.checkout(session).await.unwrap();

        // Price change after checkout must not be reflected anywhere.
        fx.catalog.insert(product(1, "V-Belt Pulleys", 99999));

        let stored = fx
            .orders
            .get_order(receipt.order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total_cents, 20000);
        let items = fx.orders.get_order_items(receipt.order.id).await.unwrap();
        assert_eq!(items[0].unit_price_cents, 10000);
    }

    #[tokio::test]
    async fn empty_cart_creates_nothing() {
        let fx = fixture();
        let session = SessionId::new();

        let err = fx.runner.checkout(session).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutRunError::Checkout(CheckoutError::EmptyCart)
        ));
        assert!(fx.orders.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cart_of_vanished_products_fails_and_stays_intact() {
        let fx = fixture();
        let session = SessionId::new();

        let mut cart = Cart::new();
        cart.add(pid(404), 1);
        fx.sessions.set_cart(session, cart.clone()).await.unwrap();

        let err = fx.runner.checkout(session).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutRunError::Checkout(CheckoutError::EmptyAfterValidation { dropped: 1 })
        ));

        assert!(fx.orders.list_orders().await.unwrap().is_empty());
        assert_eq!(fx.sessions.get_cart(session).await.unwrap(), cart);
    }

    #[tokio::test]
    async fn dropped_lines_are_reported_on_partial_survival() {
        let fx = fixture();
        let session = SessionId::new();

        let mut cart = Cart::new();
        cart.add(pid(1), 1);
        cart.add(pid(404), 5);
        fx.sessions.set_cart(session, cart).await.unwrap();

        let receipt = fx.runner.checkout(session).await.unwrap();

        assert_eq!(receipt.order.total_cents, 10000);
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.dropped, vec![pid(404)]);
    }

    /// Order store double that fails the item write, exercising the
    /// compensation path.
    struct ItemWriteFails {
        inner: InMemoryOrderStore,
        deleted: AtomicBool,
    }

    impl ItemWriteFails {
        fn new() -> Self {
            Self {
                inner: InMemoryOrderStore::new(),
                deleted: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl OrderStore for ItemWriteFails {
        async fn create_order(
            &self,
            total_cents: u64,
            status: OrderStatus,
        ) -> Result<Order, StoreError> {
            self.inner.create_order(total_cents, status).await
        }

        async fn create_order_items(
            &self,
            _order_id: OrderId,
            _items: &[NewOrderItem],
        ) -> Result<(), StoreError> {
            Err(StoreError::backend("simulated item write failure"))
        }

        async fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
            self.deleted.store(true, Ordering::SeqCst);
            self.inner.delete_order(id).await
        }

        async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
            self.inner.get_order(id).await
        }

        async fn get_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, StoreError> {
            self.inner.get_order_items(order_id).await
        }

        async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
            self.inner.list_orders().await
        }

        async fn update_status(
            &self,
            id: OrderId,
            status: OrderStatus,
        ) -> Result<(), StoreError> {
            self.inner.update_status(id, status).await
        }
    }

    #[tokio::test]
    async fn failed_item_write_rolls_back_the_order_and_keeps_the_cart() {
        let catalog = Arc::new(InMemoryCatalog::with_products(vec![product(
            1,
            "V-Belt Pulleys",
            10000,
        )]));
        let orders = Arc::new(ItemWriteFails::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let runner = CheckoutRunner::new(catalog, orders.clone(), sessions.clone());

        let session = SessionId::new();
        let mut cart = Cart::new();
        cart.add(pid(1), 2);
        sessions.set_cart(session, cart.clone()).await.unwrap();

        let err = runner.checkout(session).await.unwrap_err();
        assert!(matches!(err, CheckoutRunError::Store(_)));

        // The orphan order was compensated away and the cart survives.
        assert!(orders.deleted.load(Ordering::SeqCst));
        assert!(orders.list_orders().await.unwrap().is_empty());
        assert_eq!(sessions.get_cart(session).await.unwrap(), cart);
    }
}
