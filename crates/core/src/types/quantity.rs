//! Cart line quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a quantity is outside the selectable range.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quantity must be between {min} and {max}", min = Quantity::MIN, max = Quantity::MAX)]
pub struct QuantityError;

/// A cart line quantity.
///
/// The cart only offers quantities 1 through 5, so the invariant is enforced
/// here rather than checked ad hoc in handlers. Deserialization goes through
/// the same check, so out-of-range values are rejected at the wire too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest selectable quantity.
    pub const MIN: u32 = 1;
    /// Largest selectable quantity.
    pub const MAX: u32 = 5;

    /// Create a `Quantity`, rejecting values outside `1..=5`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] if `value` is zero or greater than
    /// [`Quantity::MAX`].
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(QuantityError)
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_selectable_range() {
        for value in Quantity::MIN..=Quantity::MAX {
            assert_eq!(Quantity::new(value).unwrap().get(), value);
        }
    }

    #[test]
    fn test_rejects_zero_and_above_max() {
        assert_eq!(Quantity::new(0), Err(QuantityError));
        assert_eq!(Quantity::new(6), Err(QuantityError));
        assert_eq!(Quantity::new(u32::MAX), Err(QuantityError));
    }

    #[test]
    fn test_serde_enforces_range() {
        let quantity: Quantity = serde_json::from_str("3").unwrap();
        assert_eq!(quantity.get(), 3);
        assert_eq!(serde_json::to_string(&quantity).unwrap(), "3");

        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("9").is_err());
    }
}
