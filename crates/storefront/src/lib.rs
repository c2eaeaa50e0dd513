//! Quikmart Storefront library.
//!
//! Shopper-side cart and checkout logic for the Quikmart marketplace:
//!
//! - [`staging`] - Picking cart items for checkout and splitting them into
//!   one order per vendor
//! - [`pagination`] - Page slicing for the cart and staging views
//! - [`state`] - The explicit per-shopper [`state::Session`]
//! - [`services`] - Checkout and cart workflows over the API
//! - [`api`] - Marketplace REST API client
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod models;
pub mod pagination;
pub mod services;
pub mod staging;
pub mod state;
