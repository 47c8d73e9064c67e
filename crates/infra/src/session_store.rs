use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use beltline_auth::Principal;
use beltline_cart::Cart;
use beltline_core::SessionId;

use crate::error::StoreError;

/// Everything the storefront keeps per visitor session: the cart and the
/// optional authenticated principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub cart: Cart,
    pub principal: Option<Principal>,
}

/// Key-value session persistence.
///
/// Sessions are opaque to the store; mutations are written through
/// immediately (no batching). An unknown session id reads as an empty
/// record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_cart(&self, id: SessionId) -> Result<Cart, StoreError>;

    async fn set_cart(&self, id: SessionId, cart: Cart) -> Result<(), StoreError>;

    async fn get_principal(&self, id: SessionId) -> Result<Option<Principal>, StoreError>;

    /// Set (login) or clear (logout) the session's principal.
    async fn set_principal(
        &self,
        id: SessionId,
        principal: Option<Principal>,
    ) -> Result<(), StoreError>;
}

/// In-memory session store for dev/tests.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_cart(&self, id: SessionId) -> Result<Cart, StoreError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| StoreError::backend("session lock poisoned"))?;
        Ok(sessions.get(&id).map(|r| r.cart.clone()).unwrap_or_default())
    }

    async fn set_cart(&self, id: SessionId, cart: Cart) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| StoreError::backend("session lock poisoned"))?;
        sessions.entry(id).or_default().cart = cart;
        Ok(())
    }

    async fn get_principal(&self, id: SessionId) -> Result<Option<Principal>, StoreError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| StoreError::backend("session lock poisoned"))?;
        Ok(sessions.get(&id).and_then(|r| r.principal.clone()))
    }

    async fn set_principal(
        &self,
        id: SessionId,
        principal: Option<Principal>,
    ) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| StoreError::backend("session lock poisoned"))?;
        sessions.entry(id).or_default().principal = principal;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beltline_auth::Role;
    use beltline_core::ProductId;

    #[tokio::test]
    async fn unknown_session_reads_as_empty_cart() {
        let store = InMemorySessionStore::new();
        let cart = store.get_cart(SessionId::new()).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn cart_and_principal_are_independent_per_session() {
        let store = InMemorySessionStore::new();
        let a = SessionId::new();
        let b = SessionId::new();

        let mut cart = Cart::new();
        cart.add(ProductId::from_raw(1), 2);
        store.set_cart(a, cart.clone()).await.unwrap();
        store
            .set_principal(b, Some(Principal::new("owner", Role::Admin)))
            .await
            .unwrap();

        assert_eq!(store.get_cart(a).await.unwrap(), cart);
        assert!(store.get_cart(b).await.unwrap().is_empty());
        assert!(store.get_principal(a).await.unwrap().is_none());
        assert!(store.get_principal(b).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn clearing_the_principal_keeps_the_cart() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let mut cart = Cart::new();
        cart.add(ProductId::from_raw(3), 1);
        store.set_cart(id, cart.clone()).await.unwrap();
        store
            .set_principal(id, Some(Principal::new("owner", Role::Admin)))
            .await
            .unwrap();

        store.set_principal(id, None).await.unwrap();

        assert!(store.get_principal(id).await.unwrap().is_none());
        assert_eq!(store.get_cart(id).await.unwrap(), cart);
    }
}
