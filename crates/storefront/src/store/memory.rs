//! In-memory commerce store for tests.
//!
//! Mirrors the backend contract closely enough to drive the full router in
//! integration tests: duplicate registration conflicts, invalid credentials,
//! and missing cart lines all produce the same error classes the HTTP
//! backend would. Holds a single cart, which is all the tests need.

use std::sync::{Arc, Mutex, MutexGuard};

use greenmart_core::cart::CartItem;
use greenmart_core::order::Order;
use greenmart_core::types::{CartItemId, Email, Quantity, UserId};

use crate::store::types::{NewUser, StoreUser};
use crate::store::{CommerceStore, StoreError};

#[derive(Default)]
struct MemoryState {
    users: Vec<StoredUser>,
    cart: Vec<CartItem>,
    orders: Vec<Order>,
    next_user_id: i32,
    cart_unavailable: bool,
}

struct StoredUser {
    user: StoreUser,
    password: String,
}

/// In-memory [`CommerceStore`] implementation.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("state lock poisoned")
    }

    /// Seed a user account and return it.
    ///
    /// # Panics
    ///
    /// Panics if `email` is not a valid address; seeding is test setup.
    pub fn seed_user(&self, email: &str, password: &str) -> StoreUser {
        let mut state = self.lock();
        state.next_user_id += 1;
        let user = StoreUser {
            id: UserId::new(state.next_user_id),
            email: Email::parse(email).expect("seed email must be valid"),
            role: crate::store::Role::User,
        };
        state.users.push(StoredUser {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    /// Seed a cart line.
    pub fn seed_cart_item(&self, item: CartItem) {
        self.lock().cart.push(item);
    }

    /// Seed a placed order.
    pub fn seed_order(&self, order: Order) {
        self.lock().orders.push(order);
    }

    /// Snapshot of the current cart, for assertions.
    #[must_use]
    pub fn cart_snapshot(&self) -> Vec<CartItem> {
        self.lock().cart.clone()
    }

    /// Make subsequent cart reads fail, simulating a backend outage.
    pub fn fail_cart_loads(&self) {
        self.lock().cart_unavailable = true;
    }
}

impl CommerceStore for InMemoryStore {
    async fn authenticate(&self, email: &Email, password: &str) -> Result<StoreUser, StoreError> {
        let state = self.lock();
        state
            .users
            .iter()
            .find(|stored| stored.user.email == *email && stored.password == password)
            .map(|stored| stored.user.clone())
            .ok_or(StoreError::Api {
                status: 401,
                message: "Invalid email or password".to_string(),
            })
    }

    async fn register(&self, new_user: &NewUser) -> Result<StoreUser, StoreError> {
        let mut state = self.lock();
        if state
            .users
            .iter()
            .any(|stored| stored.user.email == new_user.email)
        {
            return Err(StoreError::Api {
                status: 409,
                message: "An account with this email already exists".to_string(),
            });
        }

        state.next_user_id += 1;
        let user = StoreUser {
            id: UserId::new(state.next_user_id),
            email: new_user.email.clone(),
            role: new_user.role,
        };
        state.users.push(StoredUser {
            user: user.clone(),
            password: new_user.password.clone(),
        });
        Ok(user)
    }

    async fn cart_items(&self, _user: UserId) -> Result<Vec<CartItem>, StoreError> {
        let state = self.lock();
        if state.cart_unavailable {
            return Err(StoreError::Api {
                status: 503,
                message: "Cart is unavailable".to_string(),
            });
        }
        Ok(state.cart.clone())
    }

    async fn update_quantity(
        &self,
        item: CartItemId,
        quantity: Quantity,
    ) -> Result<CartItem, StoreError> {
        let mut state = self.lock();
        let line = state
            .cart
            .iter_mut()
            .find(|line| line.id == item)
            .ok_or_else(|| StoreError::NotFound(format!("cart item {item}")))?;
        line.quantity = quantity;
        Ok(line.clone())
    }

    async fn remove_item(&self, item: CartItemId) -> Result<(), StoreError> {
        let mut state = self.lock();
        let before = state.cart.len();
        state.cart.retain(|line| line.id != item);
        if state.cart.len() == before {
            return Err(StoreError::NotFound(format!("cart item {item}")));
        }
        Ok(())
    }

    async fn orders(&self, _user: UserId) -> Result<Vec<Order>, StoreError> {
        Ok(self.lock().orders.clone())
    }
}
