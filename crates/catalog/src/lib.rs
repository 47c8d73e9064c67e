//! `beltline-catalog` — product records as read by the storefront.
//!
//! The catalog is owned by an external store; this crate only defines the
//! shape of a product. Prices read here are snapshotted by checkout and
//! never re-read after an order is created.

pub mod product;

pub use product::Product;
