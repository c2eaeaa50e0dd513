//! `reqwest` implementation of [`MarketplaceApi`].

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use quikmart_core::{Numeric, ProductId, UserId};

use super::endpoints::{
    self, CartRequest, RemoveFromCartRequest, UpdateUserRequest, UserEdits,
};
use super::{ApiError, MarketplaceApi};
use crate::config::MarketplaceApiConfig;
use crate::models::OrderPayload;

/// Client for the marketplace REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct MarketplaceClient {
    inner: Arc<MarketplaceClientInner>,
}

struct MarketplaceClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for MarketplaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl MarketplaceClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &MarketplaceApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| ApiError::InvalidToken)?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(MarketplaceClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Send a JSON body and treat any 2xx status as success.
    async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.inner.base_url.join(path)?;

        let response = self
            .inner
            .client
            .request(method, url)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let response_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                path,
                body = %response_text.chars().take(500).collect::<String>(),
                "Marketplace API returned non-success status"
            );
            return Err(ApiError::api(status.as_u16(), &response_text));
        }

        debug!(status = %status, path, "Marketplace API request succeeded");
        Ok(())
    }
}

impl MarketplaceApi for MarketplaceClient {
    #[instrument(skip_all, fields(orders = orders.len()))]
    async fn create_orders(&self, orders: &[OrderPayload]) -> Result<(), ApiError> {
        self.send_json(Method::POST, endpoints::NEW_ORDERS, orders)
            .await
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn update_user_coins(&self, user_id: &UserId, coins: Decimal) -> Result<(), ApiError> {
        let body = UpdateUserRequest {
            id: user_id,
            edits: UserEdits {
                coins: Some(Numeric::from(coins)),
            },
        };
        self.send_json(Method::PATCH, endpoints::USER, &body).await
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn empty_cart(&self, user_id: &UserId) -> Result<(), ApiError> {
        self.send_json(Method::PATCH, endpoints::EMPTY_CART, &CartRequest { user_id })
            .await
    }

    #[instrument(skip_all, fields(user_id = %user_id, product_id = %product_id))]
    async fn remove_from_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), ApiError> {
        let body = RemoveFromCartRequest {
            user_id,
            product_id,
        };
        self.send_json(Method::PATCH, endpoints::REMOVE_FROM_CART, &body)
            .await
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn cart_to_wishlist(&self, user_id: &UserId) -> Result<(), ApiError> {
        self.send_json(Method::PATCH, endpoints::CART_TO_WISHLIST, &CartRequest { user_id })
            .await
    }
}
