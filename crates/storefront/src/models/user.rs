//! Shopper account as returned by the marketplace API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quikmart_core::{Numeric, Role, UserId};

/// A signed-in marketplace user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name, copied into orders as `fromName`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Reward coin balance.
    #[serde(default)]
    pub coins: Numeric,
}

impl User {
    /// Current coin balance, treating a missing or garbled value as zero.
    #[must_use]
    pub fn coin_balance(&self) -> Decimal {
        self.coins.to_decimal()
    }
}
