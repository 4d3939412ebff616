//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the commerce backend; every handler re-reads it
//! after dispatching so the rendered totals always reflect the current
//! item list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use greenmart_core::cart::{self, CartItem};
use greenmart_core::types::{CartItemId, Quantity, UserId};

use crate::filters::{self, format_money};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::state::AppState;
use crate::store::CommerceStore;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: CartItemId,
    pub title: String,
    pub brand: String,
    pub thumbnail: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub quantity_options: Vec<QuantityOption>,
}

/// One entry of the quantity selector.
#[derive(Clone, Copy)]
pub struct QuantityOption {
    pub value: u32,
    pub selected: bool,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }

    /// Build the display cart from backend items, recomputing totals.
    #[must_use]
    pub fn from_items(items: &[CartItem]) -> Self {
        let totals = cart::totals(items);
        Self {
            items: items.iter().map(CartItemView::from).collect(),
            subtotal: format_money(totals.subtotal),
            item_count: totals.item_count,
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        let quantity = item.quantity.get();
        Self {
            id: item.id,
            title: item.product.title.clone(),
            brand: item.product.brand.clone(),
            thumbnail: item.product.thumbnail.clone(),
            quantity,
            unit_price: format_money(item.product.discounted_price()),
            line_total: format_money(item.line_total()),
            quantity_options: (Quantity::MIN..=Quantity::MAX)
                .map(|value| QuantityOption {
                    value,
                    selected: value == quantity,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: CartItemId,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: CartItemId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Helpers
// =============================================================================

/// Fetch the user's cart and build the display view.
///
/// A load failure renders as an empty view rather than an error page; the
/// caller decides whether "empty and loaded" means a redirect.
async fn load_cart_view<S: CommerceStore>(state: &AppState<S>, user: UserId) -> CartView {
    match state.store().cart_items(user).await {
        Ok(items) => CartView::from_items(&items),
        Err(e) => {
            tracing::warn!("Failed to fetch cart for user {user}: {e}");
            CartView::empty()
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
///
/// An empty cart that loaded successfully redirects home; a failed load
/// renders the empty-cart page instead.
#[instrument(skip(state))]
pub async fn show<S: CommerceStore>(
    State(state): State<AppState<S>>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match state.store().cart_items(user.id).await {
        Ok(items) if items.is_empty() => Redirect::to("/").into_response(),
        Ok(items) => CartShowTemplate {
            cart: CartView::from_items(&items),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Failed to fetch cart for user {}: {e}", user.id);
            CartShowTemplate {
                cart: CartView::empty(),
            }
            .into_response()
        }
    }
}

/// Update cart item quantity (HTMX).
///
/// Dispatches the quantity change, then re-reads the cart and returns the
/// items fragment with an HTMX trigger to refresh the count badge.
#[instrument(skip(state))]
pub async fn update<S: CommerceStore>(
    State(state): State<AppState<S>>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let Ok(quantity) = Quantity::new(form.quantity) else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<span class=\"text-red-500\">Quantity must be between 1 and 5</span>"),
        )
            .into_response();
    };

    if let Err(e) = state.store().update_quantity(form.item_id, quantity).await {
        tracing::error!("Failed to update cart item {}: {e}", form.item_id);
    }

    let cart = load_cart_view(&state, user.id).await;
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove<S: CommerceStore>(
    State(state): State<AppState<S>>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    if let Err(e) = state.store().remove_item(form.item_id).await {
        tracing::error!("Failed to remove cart item {}: {e}", form.item_id);
    }

    let cart = load_cart_view(&state, user.id).await;
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count<S: CommerceStore>(
    State(state): State<AppState<S>>,
    OptionalAuth(user): OptionalAuth,
) -> impl IntoResponse {
    let count = match user {
        Some(user) => state
            .store()
            .cart_items(user.id)
            .await
            .map(|items| cart::totals(&items).item_count)
            .unwrap_or(0),
        None => 0,
    };

    CartCountTemplate { count }
}
