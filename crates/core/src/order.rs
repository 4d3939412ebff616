//! Order-history domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Product;
use crate::types::{OrderId, OrderStatus, Quantity};

/// A line on a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The ordered product, as priced at purchase time.
    pub product: Product,
    /// Ordered quantity.
    pub quantity: Quantity,
}

/// A placed order, as returned by the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID in the commerce backend.
    pub id: OrderId,
    /// Ordered lines.
    pub items: Vec<OrderItem>,
    /// Total charged, as computed by the backend at purchase time.
    pub total: Decimal,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity.get()).sum()
    }
}
