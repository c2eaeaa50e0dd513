//! Endpoint paths and request bodies.
//!
//! Paths are relative to the configured API base URL (which always ends in
//! `/`), so they carry no leading slash.

use serde::Serialize;

use quikmart_core::{Numeric, ProductId, UserId};

/// `POST` - body: array of order payloads.
pub const NEW_ORDERS: &str = "orders/new";
/// `PATCH` - body: [`UpdateUserRequest`].
pub const USER: &str = "users";
/// `PATCH` - body: [`CartRequest`].
pub const EMPTY_CART: &str = "products/cart/empty";
/// `PATCH` - body: [`RemoveFromCartRequest`].
pub const REMOVE_FROM_CART: &str = "products/cart/remove";
/// `PATCH` - body: [`CartRequest`].
pub const CART_TO_WISHLIST: &str = "products/cart/to-wishlist";

/// Body for whole-cart operations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest<'a> {
    pub user_id: &'a UserId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest<'a> {
    pub user_id: &'a UserId,
    pub product_id: &'a ProductId,
}

/// Partial user update: only the listed edits are applied.
#[derive(Debug, Serialize)]
pub struct UpdateUserRequest<'a> {
    #[serde(rename = "_id")]
    pub id: &'a UserId,
    pub edits: UserEdits,
}

#[derive(Debug, Default, Serialize)]
pub struct UserEdits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coins: Option<Numeric>,
}
