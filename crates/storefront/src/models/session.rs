//! Session-related types.
//!
//! Types stored in the session for authentication state. Credentials are
//! transient: the password only exists in the submitted form and is never
//! written to the session.

use serde::{Deserialize, Serialize};

use greenmart_core::types::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's ID in the commerce backend.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
