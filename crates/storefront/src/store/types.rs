//! Wire types for the commerce backend API.

use serde::{Deserialize, Serialize};

use greenmart_core::types::{Email, UserId};

/// A user account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreUser {
    /// User ID in the backend.
    pub id: UserId,
    /// Account email.
    pub email: Email,
    /// Account role.
    pub role: Role,
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper.
    #[default]
    User,
    /// Backend administrator.
    Admin,
}

/// A shipping address attached at registration.
///
/// Signup submits an empty list; addresses are added later from the account
/// pages of the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Payload for creating a new user account.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    /// Account email.
    pub email: Email,
    /// Plaintext password; the backend hashes it.
    pub password: String,
    /// Role for the new account; signup always sends [`Role::User`].
    pub role: Role,
    /// Initial addresses; signup always sends an empty list.
    pub addresses: Vec<Address>,
}

/// Login request body.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Quantity update request body.
#[derive(Debug, Serialize)]
pub(crate) struct QuantityUpdate {
    pub quantity: u32,
}

/// Error body returned by the backend.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_serializes_signup_payload() {
        let new_user = NewUser {
            email: Email::parse("user@example.com").unwrap(),
            password: "Sup3rsafe".to_string(),
            role: Role::User,
            addresses: Vec::new(),
        };
        let json = serde_json::to_value(&new_user).unwrap();
        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["role"], "user");
        assert_eq!(json["addresses"], serde_json::json!([]));
    }

    #[test]
    fn test_store_user_deserializes() {
        let user: StoreUser = serde_json::from_str(
            r#"{"id": 12, "email": "user@example.com", "role": "user"}"#,
        )
        .unwrap();
        assert_eq!(user.id, UserId::new(12));
        assert_eq!(user.role, Role::User);
    }
}
