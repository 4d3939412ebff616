//! Cart line items and derived totals.
//!
//! Totals are purely derived: they are recomputed from the current item list
//! on every render pass and never cached.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{CartItemId, ProductId, Quantity};

/// A product as carried on a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID in the commerce backend.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Brand name.
    pub brand: String,
    /// Undiscounted unit price.
    pub price: Decimal,
    /// Percentage discount applied to the unit price (0-100).
    pub discount_percentage: Decimal,
}

impl Product {
    /// Unit price after the percentage discount, rounded to cents.
    ///
    /// `price * (1 - discount_percentage / 100)`, rounded to 2 decimal
    /// places with midpoints away from zero.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        let factor = (Decimal::ONE_HUNDRED - self.discount_percentage) / Decimal::ONE_HUNDRED;
        (self.price * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// A line item in the cart.
///
/// Owned by the commerce backend; the storefront only holds what it reads
/// for a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart line ID in the commerce backend.
    pub id: CartItemId,
    /// The product on this line.
    pub product: Product,
    /// Selected quantity (1-5).
    pub quantity: Quantity,
}

impl CartItem {
    /// Line total: discounted unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.discounted_price() * Decimal::from(self.quantity.get())
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of discounted line totals.
    pub subtotal: Decimal,
    /// Sum of line quantities.
    pub item_count: u32,
}

/// Compute subtotal and item count in a single pass over the items.
#[must_use]
pub fn totals(items: &[CartItem]) -> CartTotals {
    items.iter().fold(CartTotals::default(), |acc, item| {
        CartTotals {
            subtotal: acc.subtotal + item.line_total(),
            item_count: acc.item_count + item.quantity.get(),
        }
    })
}
