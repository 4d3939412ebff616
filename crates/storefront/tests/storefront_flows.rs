//! End-to-end router tests for the storefront.
//!
//! The full router runs against an [`InMemoryStore`] standing in for the
//! commerce backend, so login, cart, and order flows exercise the same
//! handlers, extractors, and templates as production without a network.

#![allow(clippy::unwrap_used)]

use std::net::{IpAddr, Ipv4Addr};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use chrono::TimeZone;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;
use url::Url;

use greenmart_core::cart::{CartItem, Product};
use greenmart_core::order::{Order, OrderItem};
use greenmart_core::types::{CartItemId, OrderId, OrderStatus, ProductId, Quantity};
use greenmart_storefront::config::{CommerceApiConfig, StorefrontConfig};
use greenmart_storefront::middleware::create_session_layer;
use greenmart_storefront::routes;
use greenmart_storefront::state::AppState;
use greenmart_storefront::store::InMemoryStore;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("kX9mQ2vL8pR4tW7nB3cF6hJ1dS5gA0zE"),
        api: CommerceApiConfig {
            base_url: Url::parse("http://localhost:9000").unwrap(),
            api_token: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Build the full application router around an in-memory backend.
fn test_app(store: InMemoryStore) -> Router {
    let config = test_config();
    let session_layer = create_session_layer(&config);
    let state = AppState::new(store);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::routes())
        .layer(session_layer)
        .with_state(state)
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Log in through the real login route and return the session cookie.
async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_request(
            "/auth/login",
            &format!("email={email}&password={password}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

fn sample_product(id: i32, price: Decimal, discount: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        title: "Ceramic mug".to_string(),
        thumbnail: "https://cdn.greenmart.dev/p/1.jpg".to_string(),
        brand: "Claywork".to_string(),
        price,
        discount_percentage: discount,
    }
}

fn sample_cart_item(id: i32, quantity: u32) -> CartItem {
    CartItem {
        id: CartItemId::new(id),
        // 100.00 at 10% off is 90.00 per unit
        product: sample_product(id, Decimal::new(10000, 2), Decimal::new(10, 0)),
        quantity: Quantity::new(quantity).unwrap(),
    }
}

// ============================================================================
// Health & Home
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_home_shows_signed_in_user() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    let app = test_app(store);
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let response = app
        .oneshot(
            Request::get("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Signed in as shopper@example.com"));
    assert!(body.contains("Log out"));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_page_renders() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .oneshot(Request::get("/auth/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Log in to your account"));
}

#[tokio::test]
async fn test_login_empty_fields_render_inline_errors() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .oneshot(form_request("/auth/login", "email=&password="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Email is required"));
    assert!(body.contains("Password is required"));
}

#[tokio::test]
async fn test_login_malformed_email_rejected() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .oneshot(form_request(
            "/auth/login",
            "email=not-an-email&password=Sup3rsafe",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Email not valid"));
    // The submitted value is echoed back into the form
    assert!(body.contains("value=\"not-an-email\""));
}

#[tokio::test]
async fn test_login_wrong_password_shows_backend_message() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    let app = test_app(store);

    let response = app
        .oneshot(form_request(
            "/auth/login",
            "email=shopper%40example.com&password=wrong-one",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("Invalid email or password")
    );
}

#[tokio::test]
async fn test_login_success_redirects_home_with_session() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    let app = test_app(store);

    let response = app
        .oneshot(form_request(
            "/auth/login",
            "email=shopper%40example.com&password=Sup3rsafe",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    assert!(response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_cart_item(sample_cart_item(1, 2));
    let app = test_app(store);
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/auth/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The old cookie no longer authenticates
    let response = app
        .oneshot(
            Request::get("/cart")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/login"
    );
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_weak_password_rejected() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .oneshot(form_request(
            "/auth/register",
            "email=new%40example.com&password=short&confirm_password=short",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("Password must be at least 8 characters")
    );
}

#[tokio::test]
async fn test_register_mismatched_confirmation_rejected() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .oneshot(form_request(
            "/auth/register",
            "email=new%40example.com&password=Sup3rsafe&confirm_password=Sup3rsafer",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Passwords do not match"));
}

#[tokio::test]
async fn test_register_duplicate_email_shows_backend_message() {
    let store = InMemoryStore::new();
    store.seed_user("taken@example.com", "Sup3rsafe");
    let app = test_app(store);

    let response = app
        .oneshot(form_request(
            "/auth/register",
            "email=taken%40example.com&password=An0thersafe&confirm_password=An0thersafe",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("An account with this email already exists")
    );
}

#[tokio::test]
async fn test_register_success_logs_user_in() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .clone()
        .oneshot(form_request(
            "/auth/register",
            "email=new%40example.com&password=Sup3rsafe&confirm_password=Sup3rsafe",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    // The fresh session reaches protected pages
    let response = app
        .oneshot(
            Request::get("/account/orders")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_requires_login() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .oneshot(Request::get("/cart").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/login"
    );
}

#[tokio::test]
async fn test_empty_cart_redirects_home() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    let app = test_app(store);
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let response = app
        .oneshot(
            Request::get("/cart")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn test_cart_load_failure_renders_page_instead_of_redirecting() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_cart_item(sample_cart_item(1, 2));
    store.fail_cart_loads();
    let app = test_app(store);
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let response = app
        .oneshot(
            Request::get("/cart")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // A failed load is not an empty cart: no redirect home
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_update_returns_fragment_when_cart_reload_fails() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_cart_item(sample_cart_item(1, 2));
    let app = test_app(store.clone());
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    store.fail_cart_loads();
    let mut request = form_request("/cart/update", "item_id=1&quantity=3");
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    // The dispatch went through; only the re-read failed, so the fragment
    // falls back to the empty view instead of an error page
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("HX-Trigger").unwrap(), "cart-updated");
    assert!(body_text(response).await.contains("Your cart is empty"));
    assert_eq!(store.cart_snapshot()[0].quantity.get(), 3);
}

#[tokio::test]
async fn test_cart_page_shows_discounted_totals() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_cart_item(sample_cart_item(1, 2));
    let app = test_app(store);
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let response = app
        .oneshot(
            Request::get("/cart")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Ceramic mug"));
    assert!(body.contains("$90.00 each"));
    // 2 units at 90.00
    assert!(body.contains("$180.00"));
    assert!(body.contains("Total Items in Cart"));
}

#[tokio::test]
async fn test_update_quantity_returns_fragment_and_persists() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_cart_item(sample_cart_item(1, 2));
    let app = test_app(store.clone());
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let mut request = form_request("/cart/update", "item_id=1&quantity=3");
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("HX-Trigger").unwrap(), "cart-updated");
    let body = body_text(response).await;
    // 3 units at 90.00
    assert!(body.contains("$270.00"));

    let snapshot = store.cart_snapshot();
    assert_eq!(snapshot[0].quantity.get(), 3);
}

#[tokio::test]
async fn test_update_quantity_out_of_range_rejected() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_cart_item(sample_cart_item(1, 2));
    let app = test_app(store.clone());
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let mut request = form_request("/cart/update", "item_id=1&quantity=9");
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_text(response)
            .await
            .contains("Quantity must be between 1 and 5")
    );

    // The cart is untouched
    assert_eq!(store.cart_snapshot()[0].quantity.get(), 2);
}

#[tokio::test]
async fn test_remove_item_empties_cart() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_cart_item(sample_cart_item(1, 2));
    let app = test_app(store.clone());
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let mut request = form_request("/cart/remove", "item_id=1");
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("HX-Trigger").unwrap(), "cart-updated");
    assert!(body_text(response).await.contains("Your cart is empty"));
    assert!(store.cart_snapshot().is_empty());
}

#[tokio::test]
async fn test_cart_count_badge() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_cart_item(sample_cart_item(1, 2));
    store.seed_cart_item(sample_cart_item(2, 3));
    let app = test_app(store);

    // Anonymous visitors see zero
    let response = app
        .clone()
        .oneshot(Request::get("/cart/count").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(response).await.trim(), "0");

    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;
    let response = app
        .oneshot(
            Request::get("/cart/count")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_text(response).await.trim(), "5");
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_orders_page_requires_login() {
    let app = test_app(InMemoryStore::new());

    let response = app
        .oneshot(Request::get("/account/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/login"
    );
}

#[tokio::test]
async fn test_orders_page_lists_placed_orders() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    store.seed_order(Order {
        id: OrderId::new(7),
        items: vec![OrderItem {
            product: sample_product(1, Decimal::new(10000, 2), Decimal::new(10, 0)),
            quantity: Quantity::new(2).unwrap(),
        }],
        total: Decimal::new(18000, 2),
        status: OrderStatus::Dispatched,
        placed_at: chrono::Utc.with_ymd_and_hms(2026, 3, 4, 9, 30, 0).unwrap(),
    });
    let app = test_app(store);
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let response = app
        .oneshot(
            Request::get("/account/orders")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("My Orders"));
    assert!(body.contains("#7"));
    assert!(body.contains("Mar 04, 2026"));
    assert!(body.contains("Dispatched"));
    assert!(body.contains("$180.00"));
}

#[tokio::test]
async fn test_orders_page_with_no_orders() {
    let store = InMemoryStore::new();
    store.seed_user("shopper@example.com", "Sup3rsafe");
    let app = test_app(store);
    let cookie = login(&app, "shopper%40example.com", "Sup3rsafe").await;

    let response = app
        .oneshot(
            Request::get("/account/orders")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("You have no orders yet"));
}
