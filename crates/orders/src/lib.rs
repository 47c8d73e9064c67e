//! `beltline-orders` — durable order records and the status vocabulary.
//!
//! An order is created exactly once by checkout and is immutable afterwards
//! except for its status, which the admin workflow overwrites.

pub mod order;
pub mod status;

pub use order::{NewOrderItem, Order, OrderItem};
pub use status::OrderStatus;
