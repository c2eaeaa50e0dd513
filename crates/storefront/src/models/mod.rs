//! Domain models for the storefront.
//!
//! Wire field names follow the marketplace API (`_id`, `desc`, `ownerName`,
//! ...); Rust field names are snake_case.

pub mod cart;
pub mod order;
pub mod user;

pub use cart::CartItem;
pub use order::{OrderPayload, OrderProduct, PlacedOrder};
pub use user::User;
