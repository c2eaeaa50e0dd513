//! Workflows that pair a marketplace API call with a session update.
//!
//! # Services
//!
//! - `checkout` - Two-phase order submission (orders, then reward coins)
//! - `cart` - Server-side cart edits mirrored into the session
//!
//! Every network failure is logged, queued on the session as an error
//! notice, and returned. Nothing is retried, and the session is only
//! changed after the server has accepted the change.

pub mod cart;
pub mod checkout;

pub use cart::{empty_cart, move_cart_to_wishlist, remove_cart_item};
pub use checkout::{
    CheckoutError, CheckoutOutcome, PendingCheckout, SubmittedCheckout, abandon_checkout,
    begin_checkout, finish_checkout, place_order,
};
