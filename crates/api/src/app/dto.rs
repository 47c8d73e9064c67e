use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;

use beltline_cart::Cart;
use beltline_catalog::Product;
use beltline_core::ProductId;
use beltline_infra::CheckoutReceipt;
use beltline_orders::{Order, OrderItem};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i64,
    /// Defaults to 1; non-positive values are normalized by the cart.
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(product: &Product) -> serde_json::Value {
    json!({
        "id": product.id,
        "name": product.name,
        "description": product.description,
        "specs": product.specs,
        "price_cents": product.price_cents,
        "image": product.image,
    })
}

/// Cart view joined against the catalog.
///
/// Lines whose product has vanished render without name/price; checkout
/// will drop them.
pub fn cart_to_json(cart: &Cart, products: &HashMap<ProductId, Product>) -> serde_json::Value {
    let mut subtotal_cents: u64 = 0;
    let lines: Vec<serde_json::Value> = cart
        .lines()
        .iter()
        .map(|line| match products.get(&line.product_id) {
            Some(product) => {
                let line_total = product.price_cents.saturating_mul(u64::from(line.quantity));
                subtotal_cents = subtotal_cents.saturating_add(line_total);
                json!({
                    "product_id": line.product_id,
                    "quantity": line.quantity,
                    "name": product.name,
                    "unit_price_cents": product.price_cents,
                    "line_total_cents": line_total,
                })
            }
            None => json!({
                "product_id": line.product_id,
                "quantity": line.quantity,
                "name": serde_json::Value::Null,
                "unit_price_cents": serde_json::Value::Null,
                "line_total_cents": serde_json::Value::Null,
            }),
        })
        .collect();

    json!({
        "lines": lines,
        "subtotal_cents": subtotal_cents,
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    json!({
        "id": order.id,
        "total_cents": order.total_cents,
        "status": order.status,
        "created_at": order.created_at,
    })
}

pub fn order_item_to_json(item: &OrderItem, product_name: Option<&str>) -> serde_json::Value {
    json!({
        "product_id": item.product_id,
        "product_name": product_name,
        "quantity": item.quantity,
        "unit_price_cents": item.unit_price_cents,
        "line_total_cents": item.line_total_cents(),
    })
}

pub fn receipt_to_json(receipt: &CheckoutReceipt) -> serde_json::Value {
    json!({
        "order": order_to_json(&receipt.order),
        "items": receipt
            .items
            .iter()
            .map(|item| order_item_to_json(item, None))
            .collect::<Vec<_>>(),
        "dropped_product_ids": receipt.dropped,
    })
}
