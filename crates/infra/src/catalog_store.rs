use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use beltline_catalog::Product;
use beltline_core::ProductId;

use crate::error::StoreError;

/// Read-only access to the product catalog.
///
/// No caching: freshness at call time is sufficient because checkout
/// snapshots prices downstream.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// All products, ordered by name for display.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Batched lookup used by checkout: one read covering every id, so a
    /// concurrent catalog edit cannot produce a partial view.
    async fn get_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, StoreError>;
}

/// In-memory catalog for dev/tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: RwLock::new(map),
        }
    }

    pub fn insert(&self, product: Product) {
        if let Ok(mut map) = self.products.write() {
            map.insert(product.id, product);
        }
    }

    pub fn remove(&self, id: ProductId) {
        if let Ok(mut map) = self.products.write() {
            map.remove(&id);
        }
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let map = self
            .products
            .read()
            .map_err(|_| StoreError::backend("catalog lock poisoned"))?;

        let mut products: Vec<Product> = map.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let map = self
            .products
            .read()
            .map_err(|_| StoreError::backend("catalog lock poisoned"))?;
        Ok(map.get(&id).cloned())
    }

    async fn get_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Product>, StoreError> {
        let map = self
            .products
            .read()
            .map_err(|_| StoreError::backend("catalog lock poisoned"))?;

        Ok(ids
            .iter()
            .filter_map(|id| map.get(id).map(|p| (*id, p.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let catalog = InMemoryCatalog::with_products(seed::demo_products());
        let products = catalog.list().await.unwrap();

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn get_by_ids_only_returns_known_products() {
        let catalog = InMemoryCatalog::with_products(seed::demo_products());
        let known = ProductId::from_raw(1);
        let unknown = ProductId::from_raw(999);

        let found = catalog.get_by_ids(&[known, unknown]).await.unwrap();

        assert!(found.contains_key(&known));
        assert!(!found.contains_key(&unknown));
    }
}
