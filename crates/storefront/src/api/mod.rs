//! Marketplace REST API.
//!
//! # Architecture
//!
//! - [`MarketplaceApi`] is the seam between workflows and the network; the
//!   checkout and cart workflows are generic over it
//! - [`MarketplaceClient`] is the `reqwest` implementation
//! - With the `test-support` feature, [`fake::FakeMarketplace`] is an
//!   in-memory implementation that records calls
//!
//! Every endpoint answers success or failure only; response bodies are not
//! interpreted. Any non-2xx status is an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use quikmart_storefront::api::{MarketplaceApi, MarketplaceClient};
//!
//! let client = MarketplaceClient::new(&config.api)?;
//! client.empty_cart(&user.id).await?;
//! ```

mod client;
pub mod endpoints;
#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use client::MarketplaceClient;

use std::future::Future;

use rust_decimal::Decimal;
use thiserror::Error;

use quikmart_core::{ProductId, UserId};

use crate::models::OrderPayload;

/// Maximum number of response body characters kept in an error.
const ERROR_BODY_LIMIT: usize = 200;

/// Errors that can occur when calling the marketplace API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body encoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configured token is not a valid header value.
    #[error("Invalid API token")]
    InvalidToken,
}

impl ApiError {
    /// Build an `Api` error, keeping only the start of a long body.
    #[must_use]
    pub fn api(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            message: body.chars().take(ERROR_BODY_LIMIT).collect(),
        }
    }
}

/// Operations the storefront needs from the marketplace backend.
pub trait MarketplaceApi {
    /// Submit one order per vendor in a single request.
    fn create_orders(
        &self,
        orders: &[OrderPayload],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Persist a new coin balance for `user_id`.
    fn update_user_coins(
        &self,
        user_id: &UserId,
        coins: Decimal,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Remove every item from the shopper's cart.
    fn empty_cart(&self, user_id: &UserId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Remove one product from the shopper's cart.
    fn remove_from_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Move the whole cart onto the shopper's wishlist.
    fn cart_to_wishlist(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::api(503, "maintenance");
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
    }

    #[test]
    fn test_api_error_truncates_body() {
        let body = "x".repeat(1000);
        let ApiError::Api { message, .. } = ApiError::api(500, &body) else {
            panic!("expected Api variant");
        };
        assert_eq!(message.len(), ERROR_BODY_LIMIT);
    }
}
