//! Core types for Quikmart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod availability;
pub mod id;
pub mod numeric;
pub mod price;
pub mod status;

pub use availability::Availability;
pub use id::*;
pub use numeric::Numeric;
pub use price::{CurrencyCode, Price};
pub use status::*;
