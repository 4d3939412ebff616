//! Commerce backend boundary.
//!
//! The storefront owns no state of its own: users, cart items, and orders
//! live in an external commerce backend. Handlers talk to it through the
//! [`CommerceStore`] trait, which is injected via application state rather
//! than reached through a global. [`HttpStore`] is the production
//! implementation; [`InMemoryStore`] backs the integration tests.
//!
//! Every call is a single dispatch with no retry, backoff, or ordering
//! guarantee between concurrent dispatches: if two quantity updates race,
//! the backend's last write wins.

mod http;
mod memory;
pub mod types;

pub use http::HttpStore;
pub use memory::InMemoryStore;
pub use types::{Address, NewUser, Role, StoreUser};

use std::future::Future;

use thiserror::Error;

use greenmart_core::cart::CartItem;
use greenmart_core::order::Order;
use greenmart_core::types::{CartItemId, Email, Quantity, UserId};

/// Errors from commerce backend operations.
///
/// `Api` messages come from the backend and are displayed to the user
/// verbatim, so the backend is responsible for keeping them presentable.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport failure (connect, timeout, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the operation.
    #[error("{message}")]
    Api {
        /// HTTP status returned by the backend.
        status: u16,
        /// Message from the backend's error body.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Read and write access to the commerce backend.
///
/// Reads are the selectors a view consumes before rendering; writes are the
/// intents it dispatches on user interaction. Completion of a write is only
/// observed by re-reading on a later render.
pub trait CommerceStore: Send + Sync + 'static {
    /// Authenticate with email and password.
    fn authenticate(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<StoreUser, StoreError>> + Send;

    /// Register a new user account.
    fn register(
        &self,
        new_user: &NewUser,
    ) -> impl Future<Output = Result<StoreUser, StoreError>> + Send;

    /// Fetch the user's current cart items.
    fn cart_items(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<CartItem>, StoreError>> + Send;

    /// Set the quantity on a cart line.
    fn update_quantity(
        &self,
        item: CartItemId,
        quantity: Quantity,
    ) -> impl Future<Output = Result<CartItem, StoreError>> + Send;

    /// Remove a cart line.
    fn remove_item(&self, item: CartItemId) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fetch the user's placed orders, newest first.
    fn orders(&self, user: UserId) -> impl Future<Output = Result<Vec<Order>, StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_backend_message_verbatim() {
        let err = StoreError::Api {
            status: 401,
            message: "Invalid email or password".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_not_found_display() {
        let err = StoreError::NotFound("cart item 9".to_string());
        assert_eq!(err.to_string(), "Not found: cart item 9");
    }
}
