//! Quikmart Core - Shared marketplace types.
//!
//! This crate provides common types used across all Quikmart components:
//! - `storefront` - Shopper cart, order staging, and the marketplace API client
//! - `cli` - Command-line driver for carts and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O and no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, lenient numerics, currencies, and statuses
//! - [`routes`] - Client route paths for each marketplace role
//! - [`text`] - Small display helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod routes;
pub mod text;
pub mod types;

pub use types::*;
