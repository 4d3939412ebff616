//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /account/orders         - Order history
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use crate::store::CommerceStore;

/// Create the auth routes router.
pub fn auth_routes<S: CommerceStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login::<S>))
        .route(
            "/register",
            get(auth::register_page).post(auth::register::<S>),
        )
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes<S: CommerceStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(cart::show::<S>))
        .route("/update", post(cart::update::<S>))
        .route("/remove", post(cart::remove::<S>))
        .route("/count", get(cart::count::<S>))
}

/// Create the account routes router.
pub fn account_routes<S: CommerceStore>() -> Router<AppState<S>> {
    Router::new().route("/orders", get(orders::orders::<S>))
}

/// Create all routes for the storefront.
pub fn routes<S: CommerceStore>() -> Router<AppState<S>> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Account routes
        .nest("/account", account_routes())
        // Auth routes
        .nest("/auth", auth_routes())
}
