//! HTTP client for the commerce backend.
//!
//! Plain JSON over REST with `reqwest`. Error bodies of the form
//! `{"message": "..."}` are surfaced as [`StoreError::Api`] so the message
//! reaches the user unchanged.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::debug;

use greenmart_core::cart::CartItem;
use greenmart_core::order::Order;
use greenmart_core::types::{CartItemId, Email, Quantity, UserId};

use crate::config::CommerceApiConfig;
use crate::store::types::{ApiErrorBody, LoginRequest, NewUser, QuantityUpdate, StoreUser};
use crate::store::{CommerceStore, StoreError};

/// Client for the commerce backend API.
#[derive(Clone)]
pub struct HttpStore {
    inner: Arc<HttpStoreInner>,
}

struct HttpStoreInner {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<secrecy::SecretString>,
}

impl HttpStore {
    /// Create a new commerce backend client.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        Self {
            inner: Arc::new(HttpStoreInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                api_token: config.api_token.clone(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Attach the bearer token when the backend requires one.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.api_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Turn a non-success response into a [`StoreError::Api`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body).map_or_else(
            |_| {
                if body.is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    body
                }
            },
            |parsed| parsed.message,
        );

        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl CommerceStore for HttpStore {
    async fn authenticate(&self, email: &Email, password: &str) -> Result<StoreUser, StoreError> {
        debug!(email = %email, "authenticating against commerce backend");
        let response = self
            .authorize(self.inner.client.post(self.endpoint("/auth/login")))
            .json(&LoginRequest {
                email: email.as_str(),
                password,
            })
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<StoreUser>().await?)
    }

    async fn register(&self, new_user: &NewUser) -> Result<StoreUser, StoreError> {
        debug!(email = %new_user.email, "registering user with commerce backend");
        let response = self
            .authorize(self.inner.client.post(self.endpoint("/users")))
            .json(new_user)
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<StoreUser>().await?)
    }

    async fn cart_items(&self, user: UserId) -> Result<Vec<CartItem>, StoreError> {
        let response = self
            .authorize(self.inner.client.get(self.endpoint("/cart")))
            .query(&[("user", user.as_i32())])
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<Vec<CartItem>>().await?)
    }

    async fn update_quantity(
        &self,
        item: CartItemId,
        quantity: Quantity,
    ) -> Result<CartItem, StoreError> {
        let response = self
            .authorize(
                self.inner
                    .client
                    .patch(self.endpoint(&format!("/cart/{item}"))),
            )
            .json(&QuantityUpdate {
                quantity: quantity.get(),
            })
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<CartItem>().await?)
    }

    async fn remove_item(&self, item: CartItemId) -> Result<(), StoreError> {
        let response = self
            .authorize(
                self.inner
                    .client
                    .delete(self.endpoint(&format!("/cart/{item}"))),
            )
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn orders(&self, user: UserId) -> Result<Vec<Order>, StoreError> {
        let response = self
            .authorize(self.inner.client.get(self.endpoint("/orders")))
            .query(&[("user", user.as_i32())])
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<Vec<Order>>().await?)
    }
}
