//! Infrastructure layer: store ports, adapters, and the checkout runner.
//!
//! The three ports (`CatalogReader`, `OrderStore`, `SessionStore`) each
//! ship an in-memory adapter for dev/tests and a Postgres adapter for
//! deployment. `CheckoutRunner` wires the ports into the full
//! resolve → price → persist → clear pipeline.

pub mod catalog_store;
pub mod checkout_runner;
pub mod error;
pub mod order_store;
pub mod postgres;
pub mod seed;
pub mod session_store;

pub use catalog_store::{CatalogReader, InMemoryCatalog};
pub use checkout_runner::{CheckoutReceipt, CheckoutRunError, CheckoutRunner};
pub use error::StoreError;
pub use order_store::{InMemoryOrderStore, OrderStore};
pub use session_store::{InMemorySessionStore, SessionRecord, SessionStore};
