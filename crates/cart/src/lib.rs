//! `beltline-cart` — the session-scoped shopping cart.
//!
//! A cart is a plain value: the session layer persists it after every
//! mutation and checkout receives a snapshot. Nothing here talks to the
//! catalog; a cart may reference product ids that no longer exist, and
//! that is resolved at checkout time, not at add time.

pub mod cart;

pub use cart::{Cart, CartLine};
