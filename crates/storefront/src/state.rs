//! Shopper session state.
//!
//! Everything the cart page works with lives in one [`Session`] owned by a
//! single task: the user, their cart, wishlist and placed orders, the
//! staging list, both page cursors, the in-flight submission flag, and the
//! notices waiting to be shown. Workflows in [`crate::services`] take
//! `&mut Session`, so mutations are serialized by ownership rather than
//! locks.

use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quikmart_core::{Numeric, ProductId};

use crate::models::{CartItem, OrderPayload, PlacedOrder, User};
use crate::pagination::Pager;
use crate::staging::{StagedItem, StagingList};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A message for the shopper, shown once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Persistent part of a session, as stored between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: User,
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub wishlist: Vec<CartItem>,
    #[serde(default)]
    pub orders: Vec<PlacedOrder>,
}

/// Session state for one signed-in shopper.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
    cart: Vec<CartItem>,
    wishlist: Vec<CartItem>,
    orders: Vec<PlacedOrder>,
    staging: StagingList,
    cart_pager: Pager,
    staging_pager: Pager,
    submitting: bool,
    notices: Vec<Notice>,
}

impl Session {
    /// Start a session with an empty cart.
    #[must_use]
    pub fn new(user: User, page_size: NonZeroUsize) -> Self {
        Self {
            user,
            cart: Vec::new(),
            wishlist: Vec::new(),
            orders: Vec::new(),
            staging: StagingList::new(),
            cart_pager: Pager::new(page_size),
            staging_pager: Pager::new(page_size),
            submitting: false,
            notices: Vec::new(),
        }
    }

    /// Restore a session from a snapshot. Transient state starts fresh.
    #[must_use]
    pub fn from_snapshot(snapshot: SessionSnapshot, page_size: NonZeroUsize) -> Self {
        let mut session = Self::new(snapshot.user, page_size);
        session.cart = snapshot.cart;
        session.wishlist = snapshot.wishlist;
        session.orders = snapshot.orders;
        session
    }

    /// Persistent state, without staging, pages, or notices.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            cart: self.cart.clone(),
            wishlist: self.wishlist.clone(),
            orders: self.orders.clone(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &[CartItem] {
        &self.wishlist
    }

    #[must_use]
    pub fn orders(&self) -> &[PlacedOrder] {
        &self.orders
    }

    #[must_use]
    pub const fn staging(&self) -> &StagingList {
        &self.staging
    }

    /// Whether an order submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn cart_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.cart.iter().find(|item| &item.id == id)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add an item to the local cart unless it is already there.
    pub fn add_to_cart(&mut self, item: CartItem) -> bool {
        if self.cart_item(&item.id).is_some() {
            return false;
        }
        self.cart.push(item);
        true
    }

    /// Drop an item from the local cart after the server removed it.
    ///
    /// The item stays staged if it was; the staging list is independent.
    pub fn remove_cart_item(&mut self, id: &ProductId) -> Option<CartItem> {
        let index = self.cart.iter().position(|item| &item.id == id)?;
        Some(self.cart.remove(index))
    }

    /// Empty the local cart after the server emptied it.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Append the cart onto the wishlist and empty the cart.
    pub fn move_cart_to_wishlist(&mut self) {
        self.wishlist.append(&mut self.cart);
    }

    // =========================================================================
    // Staging
    // =========================================================================

    /// Stage a cart item by ID. Unknown IDs are ignored.
    pub fn stage_item(&mut self, id: &ProductId) -> bool {
        match self.cart.iter().find(|item| &item.id == id) {
            Some(item) => self.staging.add(item),
            None => false,
        }
    }

    /// Replace the staging list with every available cart item.
    pub fn stage_available_cart(&mut self) {
        self.staging.set_from_available_cart(&self.cart);
    }

    pub fn update_staged_quantity(&mut self, id: &ProductId, quantity: Numeric) -> bool {
        self.staging.update_quantity(id, quantity)
    }

    pub fn unstage_item(&mut self, id: &ProductId) -> bool {
        self.staging.remove(id)
    }

    pub fn clear_staging(&mut self) {
        self.staging.clear();
    }

    /// Flag a submission as started. Returns `false` if one already is.
    pub(crate) const fn begin_submission(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    pub(crate) const fn end_submission(&mut self) {
        self.submitting = false;
    }

    // =========================================================================
    // Orders and rewards
    // =========================================================================

    /// Mirror successfully submitted orders locally, stamped with `at`.
    pub fn record_placed_orders(&mut self, orders: &[OrderPayload], at: DateTime<Utc>) {
        self.orders.extend(orders.iter().cloned().map(|order| PlacedOrder {
            order,
            created_at: at,
        }));
    }

    pub fn set_coins(&mut self, balance: Decimal) {
        self.user.coins = Numeric::from(balance);
    }

    // =========================================================================
    // Pages
    // =========================================================================

    pub const fn set_cart_page(&mut self, page: usize) {
        self.cart_pager.set_page(page);
    }

    pub const fn set_staging_page(&mut self, page: usize) {
        self.staging_pager.set_page(page);
    }

    #[must_use]
    pub const fn cart_page(&self) -> usize {
        self.cart_pager.page()
    }

    #[must_use]
    pub const fn staging_page(&self) -> usize {
        self.staging_pager.page()
    }

    #[must_use]
    pub fn cart_page_items(&self) -> &[CartItem] {
        self.cart_pager.slice(&self.cart)
    }

    #[must_use]
    pub fn staging_page_items(&self) -> &[StagedItem] {
        self.staging_pager.slice(self.staging.items())
    }

    #[must_use]
    pub fn cart_page_count(&self) -> usize {
        self.cart_pager.count(self.cart.len())
    }

    #[must_use]
    pub fn staging_page_count(&self) -> usize {
        self.staging_pager.count(self.staging.len())
    }

    // =========================================================================
    // Notices
    // =========================================================================

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take all pending notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
