use serde::{Deserialize, Serialize};

use beltline_core::ProductId;

/// A catalog product.
///
/// Immutable from the storefront's perspective: display attributes and the
/// price are read at request time, and checkout snapshots the price into
/// the order items it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub specs: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price_cents: u64,
    pub image: String,
}
