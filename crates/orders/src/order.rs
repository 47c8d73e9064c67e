use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use beltline_core::{OrderId, ProductId};

use crate::status::OrderStatus;

/// A persisted order.
///
/// `total_cents` equals the sum of its items' `price × quantity` at
/// creation time and is never recomputed from the live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Total in smallest currency unit (e.g., cents).
    pub total_cents: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// One line of a persisted order.
///
/// `unit_price_cents` is the price snapshot taken at checkout time: a
/// historical fact, immune to later catalog price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price snapshot in smallest currency unit (e.g., cents).
    pub unit_price_cents: u64,
}

/// An order item about to be persisted, before the store has assigned the
/// owning order id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price_cents: u64,
}

impl NewOrderItem {
    pub fn line_total_cents(&self) -> u64 {
        self.unit_price_cents.saturating_mul(u64::from(self.quantity))
    }

    pub fn into_order_item(self, order_id: OrderId) -> OrderItem {
        OrderItem {
            order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price_cents: self.unit_price_cents,
        }
    }
}

impl OrderItem {
    pub fn line_total_cents(&self) -> u64 {
        self.unit_price_cents.saturating_mul(u64::from(self.quantity))
    }
}
