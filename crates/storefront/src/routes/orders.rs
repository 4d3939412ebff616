//! Order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use greenmart_core::order::Order;

use crate::error::Result;
use crate::filters::{self, format_money};
use crate::middleware::RequireAuth;
use crate::state::AppState;
use crate::store::CommerceStore;

/// Order display data for templates.
pub struct OrderView {
    /// Display number, like `#42`.
    pub number: String,
    /// Placement date, like `Mar 04, 2026`.
    pub placed_at: String,
    pub status: &'static str,
    pub total: String,
    pub item_count: u32,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            number: format!("#{}", order.id),
            placed_at: order.placed_at.format("%b %d, %Y").to_string(),
            status: order.status.label(),
            total: format_money(order.total),
            item_count: order.item_count(),
        }
    }
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub email: String,
    pub orders: Vec<OrderView>,
}

/// Display the order history page.
#[instrument(skip(state))]
pub async fn orders<S: CommerceStore>(
    State(state): State<AppState<S>>,
    RequireAuth(user): RequireAuth,
) -> Result<OrdersTemplate> {
    let orders = state.store().orders(user.id).await?;

    Ok(OrdersTemplate {
        email: user.email.to_string(),
        orders: orders.iter().map(OrderView::from).collect(),
    })
}
