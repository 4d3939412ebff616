//! Status enums for orders.

use serde::{Deserialize, Serialize};

/// Fulfillment status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received, not yet shipped.
    Pending,
    /// Order handed to the carrier.
    Dispatched,
    /// Order delivered to the customer.
    Delivered,
    /// Order cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Dispatched => "Dispatched",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}
