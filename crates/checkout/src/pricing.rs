use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use beltline_cart::Cart;
use beltline_catalog::Product;
use beltline_core::ProductId;
use beltline_orders::NewOrderItem;

/// The priced outcome of validating a cart against resolved catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedCart {
    /// One item per surviving cart line, with the unit price snapshotted
    /// from the resolved product.
    pub items: Vec<NewOrderItem>,
    /// Sum of `price × quantity` over `items`.
    pub total_cents: u64,
    /// Product ids referenced by the cart but absent from the catalog.
    /// Dropped lines are excluded from the order; callers can use this to
    /// warn the visitor.
    pub dropped: Vec<ProductId>,
}

/// Failures of the pure pricing step. Neither variant mutates anything;
/// the cart stays intact for retry or inspection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart had no lines at all.
    #[error("cart is empty")]
    EmptyCart,

    /// Every cart line referenced a product that no longer exists.
    #[error("no cart line references an existing product ({dropped} line(s) dropped)")]
    EmptyAfterValidation { dropped: usize },
}

/// Validate and price a cart snapshot.
///
/// `products` must come from one batched catalog lookup covering the
/// cart's product ids; lines whose product is missing from the map are
/// dropped rather than aborting the checkout. Prices are taken from the
/// map at this moment and never re-read.
pub fn price_cart(
    cart: &Cart,
    products: &HashMap<ProductId, Product>,
) -> Result<PricedCart, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut items = Vec::with_capacity(cart.lines().len());
    let mut dropped = Vec::new();
    let mut total_cents: u64 = 0;

    for line in cart.lines() {
        match products.get(&line.product_id) {
            Some(product) => {
                let item = NewOrderItem {
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price_cents: product.price_cents,
                };
                total_cents = total_cents.saturating_add(item.line_total_cents());
                items.push(item);
            }
            None => dropped.push(line.product_id),
        }
    }

    if items.is_empty() {
        return Err(CheckoutError::EmptyAfterValidation {
            dropped: dropped.len(),
        });
    }

    Ok(PricedCart {
        items,
        total_cents,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: i64) -> ProductId {
        ProductId::from_raw(raw)
    }

    fn product(raw_id: i64, price_cents: u64) -> Product {
        Product {
            id: pid(raw_id),
            name: format!("Product {raw_id}"),
            description: String::new(),
            specs: String::new(),
            price_cents,
            image: String::new(),
        }
    }

    fn resolved(products: &[Product]) -> HashMap<ProductId, Product> {
        products.iter().map(|p| (p.id, p.clone())).collect()
    }

    #[test]
    fn prices_known_products_and_sums_the_total() {
        let mut cart = Cart::new();
        cart.add(pid(1), 2);
        cart.add(pid(2), 1);
        let products = resolved(&[product(1, 10000), product(2, 8000)]);

        let priced = price_cart(&cart, &products).unwrap();

        assert_eq!(priced.total_cents, 28000);
        assert_eq!(priced.items.len(), 2);
        assert_eq!(priced.items[0].product_id, pid(1));
        assert_eq!(priced.items[0].quantity, 2);
        assert_eq!(priced.items[0].unit_price_cents, 10000);
        assert_eq!(priced.items[1].product_id, pid(2));
        assert_eq!(priced.items[1].quantity, 1);
        assert_eq!(priced.items[1].unit_price_cents, 8000);
        assert!(priced.dropped.is_empty());
    }

    #[test]
    fn unknown_products_are_dropped_but_reported() {
        let mut cart = Cart::new();
        cart.add(pid(1), 1);
        cart.add(pid(42), 3);
        let products = resolved(&[product(1, 5000)]);

        let priced = price_cart(&cart, &products).unwrap();

        assert_eq!(priced.items.len(), 1);
        assert_eq!(priced.total_cents, 5000);
        assert_eq!(priced.dropped, vec![pid(42)]);
    }

    #[test]
    fn empty_cart_is_rejected_before_any_pricing() {
        let cart = Cart::new();
        let err = price_cart(&cart, &HashMap::new()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn cart_of_only_vanished_products_fails_distinctly() {
        let mut cart = Cart::new();
        cart.add(pid(7), 1);
        cart.add(pid(8), 2);

        let err = price_cart(&cart, &HashMap::new()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyAfterValidation { dropped: 2 });
    }

    #[test]
    fn unit_price_is_a_snapshot_of_the_resolved_map() {
        let mut cart = Cart::new();
        cart.add(pid(3), 4);
        let products = resolved(&[product(3, 12000)]);

        let priced = price_cart(&cart, &products).unwrap();

        // A later catalog change cannot affect the priced items.
        assert_eq!(priced.items[0].unit_price_cents, 12000);
        assert_eq!(priced.total_cents, 48000);
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Property: the total always equals the sum of the priced
            /// lines, and exactly one item survives per known product.
            #[test]
            fn total_equals_sum_of_line_totals(
                lines in proptest::collection::vec((1i64..30, 1i64..100, 0u64..1_000_000), 1..20)
            ) {
                let mut cart = Cart::new();
                let mut products = HashMap::new();
                for (raw_id, qty, price) in &lines {
                    cart.add(ProductId::from_raw(*raw_id), *qty);
                    products.insert(ProductId::from_raw(*raw_id), product(*raw_id, *price));
                }

                let priced = price_cart(&cart, &products).unwrap();

                let expected: u64 = priced.items.iter().map(NewOrderItem::line_total_cents).sum();
                prop_assert_eq!(priced.total_cents, expected);
                prop_assert_eq!(priced.items.len(), cart.lines().len());
                prop_assert!(priced.dropped.is_empty());
            }
        }
    }
}
