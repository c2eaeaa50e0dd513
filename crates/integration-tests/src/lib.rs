//! Integration tests for Quikmart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quikmart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `http_client` - `MarketplaceClient` against a local HTTP server
//! - `checkout_flow` - Checkout over HTTP and against the in-memory fake
//! - `cart_workflows` - Cart edits and pagination over a session
//!
//! [`MockMarketplace`] is an axum server bound to an ephemeral port that
//! accepts any request under `/api/`, records it, and answers `200` unless a
//! path has been told to fail.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use secrecy::SecretString;
use serde_json::Value;
use tokio::task::JoinHandle;

use quikmart_core::{Availability, CurrencyCode, Numeric, ProductId, Role, UserId, VendorId};
use quikmart_storefront::api::{ApiError, MarketplaceClient};
use quikmart_storefront::config::MarketplaceApiConfig;
use quikmart_storefront::models::{CartItem, User};

/// Path prefix the mock serves the API under.
const API_PREFIX: &str = "/api/";

/// Bearer token the mock client sends.
pub const TEST_TOKEN: &str = "test-token";

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `orders/new`
    pub path: String,
    pub authorization: Option<String>,
    /// JSON body, or `Value::Null` if the body was empty or not JSON
    pub body: Value,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    statuses: Arc<Mutex<HashMap<String, StatusCode>>>,
}

/// Local stand-in for the marketplace backend.
pub struct MockMarketplace {
    addr: SocketAddr,
    state: MockState,
    server: JoinHandle<()>,
}

impl MockMarketplace {
    /// Bind to `127.0.0.1:0` and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = MockState::default();
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX.trim_end_matches('/'))
    }

    /// Client configuration pointing at this server, with [`TEST_TOKEN`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn config(&self) -> Result<MarketplaceApiConfig, Box<dyn std::error::Error>> {
        let mut config = MarketplaceApiConfig::new(&self.base_url())?;
        config.token = Some(SecretString::from(TEST_TOKEN));
        Ok(config)
    }

    /// A `MarketplaceClient` for this server.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn client(&self) -> Result<MarketplaceClient, Box<dyn std::error::Error>> {
        Ok(MarketplaceClient::new(&self.config()?)?)
    }

    /// Answer requests to `path` with `status` from now on.
    pub fn respond_with(&self, path: &str, status: StatusCode) {
        lock(&self.state.statuses).insert(path.to_string(), status);
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Requests received for `path`.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

impl Drop for MockMarketplace {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(path) = uri.path().strip_prefix(API_PREFIX).map(str::to_string) else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };

    let request = RecordedRequest {
        method,
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        path: path.clone(),
    };
    lock(&state.requests).push(request);

    let status = lock(&state.statuses)
        .get(&path)
        .copied()
        .unwrap_or(StatusCode::OK);

    if status.is_success() {
        (status, axum::Json(serde_json::json!({ "ok": true }))).into_response()
    } else {
        (status, "mock failure").into_response()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A shopper with a coin balance.
#[must_use]
pub fn shopper(coins: u32) -> User {
    User {
        id: UserId::new("u1"),
        name: "Asha".to_string(),
        email: Some("asha@example.com".to_string()),
        role: Role::User,
        coins: Numeric::from(coins),
    }
}

/// An available cart item sold by `vendor`.
#[must_use]
pub fn cart_item(id: &str, vendor: &str, price: u32) -> CartItem {
    CartItem {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        description: format!("Description of {id}"),
        category: Some("grocery".to_string()),
        price: Numeric::from(price),
        currency: CurrencyCode::new("INR"),
        owner: VendorId::new(vendor),
        owner_name: format!("Vendor {vendor}"),
        availability: Availability::Available,
    }
}

/// The `status` of an `ApiError::Api`, if that is what `error` is.
#[must_use]
pub const fn api_status(error: &ApiError) -> Option<u16> {
    match error {
        ApiError::Api { status, .. } => Some(*status),
        _ => None,
    }
}
