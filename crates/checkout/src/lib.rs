//! `beltline-checkout` — the pure half of the checkout pipeline.
//!
//! Given a cart snapshot and the products resolved for it, produce the
//! priced order items and total that the order store will persist. No IO
//! happens here; the orchestration around stores lives in
//! `beltline-infra`.

pub mod pricing;

pub use pricing::{CheckoutError, PricedCart, price_cart};
