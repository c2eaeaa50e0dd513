//! In-memory [`MarketplaceApi`] for tests.
//!
//! Records every call in order and fails the endpoints it is told to fail
//! with a `503`.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use quikmart_core::{ProductId, UserId};

use super::{ApiError, MarketplaceApi};
use crate::models::OrderPayload;

/// Endpoint selector for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateOrders,
    UpdateUser,
    EmptyCart,
    RemoveFromCart,
    CartToWishlist,
}

/// A recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateOrders(Vec<OrderPayload>),
    UpdateUserCoins { user_id: UserId, coins: Decimal },
    EmptyCart(UserId),
    RemoveFromCart { user_id: UserId, product_id: ProductId },
    CartToWishlist(UserId),
}

impl Call {
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::CreateOrders(_) => Endpoint::CreateOrders,
            Self::UpdateUserCoins { .. } => Endpoint::UpdateUser,
            Self::EmptyCart(_) => Endpoint::EmptyCart,
            Self::RemoveFromCart { .. } => Endpoint::RemoveFromCart,
            Self::CartToWishlist(_) => Endpoint::CartToWishlist,
        }
    }
}

/// Fake marketplace backend.
#[derive(Debug, Default)]
pub struct FakeMarketplace {
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<Endpoint>>,
}

impl FakeMarketplace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `endpoint` answer `503 Service Unavailable` from now on.
    #[must_use]
    pub fn failing(self, endpoint: Endpoint) -> Self {
        lock(&self.failing).insert(endpoint);
        self
    }

    /// Make `endpoint` succeed again.
    pub fn restore(&self, endpoint: Endpoint) {
        lock(&self.failing).remove(&endpoint);
    }

    /// All calls so far, failed ones included.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// Calls that hit `endpoint`.
    #[must_use]
    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Call> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        let endpoint = call.endpoint();
        lock(&self.calls).push(call);
        if lock(&self.failing).contains(&endpoint) {
            return Err(ApiError::api(503, "service unavailable"));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MarketplaceApi for FakeMarketplace {
    async fn create_orders(&self, orders: &[OrderPayload]) -> Result<(), ApiError> {
        self.record(Call::CreateOrders(orders.to_vec()))
    }

    async fn update_user_coins(&self, user_id: &UserId, coins: Decimal) -> Result<(), ApiError> {
        self.record(Call::UpdateUserCoins {
            user_id: user_id.clone(),
            coins,
        })
    }

    async fn empty_cart(&self, user_id: &UserId) -> Result<(), ApiError> {
        self.record(Call::EmptyCart(user_id.clone()))
    }

    async fn remove_from_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), ApiError> {
        self.record(Call::RemoveFromCart {
            user_id: user_id.clone(),
            product_id: product_id.clone(),
        })
    }

    async fn cart_to_wishlist(&self, user_id: &UserId) -> Result<(), ApiError> {
        self.record(Call::CartToWishlist(user_id.clone()))
    }
}
