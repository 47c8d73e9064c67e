use serde::{Deserialize, Serialize};

use beltline_core::ProductId;

/// One cart line: a product reference and a positive quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A visitor's cart.
///
/// Invariant: at most one line per product id. Adding the same product
/// again increments the existing line instead of appending a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// Non-positive quantities normalize to 1 rather than failing; the
    /// storefront treats a malformed quantity as "one of it". No catalog
    /// validation happens here.
    pub fn add(&mut self, product_id: ProductId, quantity: i64) {
        let quantity = normalize_quantity(quantity);

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id,
                quantity,
            });
        }
    }

    /// Remove the line for `product_id`. No-op when absent.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empty the cart. Called only after a checkout has been persisted.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Distinct product ids referenced by the cart, in line order.
    ///
    /// Used for the single batched catalog lookup at checkout.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lines.iter().map(|l| l.product_id).collect()
    }
}

/// Coerce a raw quantity into the positive range the cart requires.
fn normalize_quantity(raw: i64) -> u32 {
    if raw < 1 {
        return 1;
    }
    u32::try_from(raw).unwrap_or(u32::MAX)
}
