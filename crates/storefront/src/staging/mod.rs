//! Order staging.
//!
//! The staging list is the subset of the cart a shopper has picked for
//! checkout, each entry carrying its own quantity. It lives only in session
//! state and is never persisted.
//!
//! Lookups by unknown product IDs are silent no-ops: the item may have been
//! removed from the cart in the meantime, which is not an error.

mod orders;

pub use orders::{build_order_payloads, compute_reward, order_total};

use quikmart_core::{Numeric, ProductId};

use crate::models::CartItem;

/// A cart item selected for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedItem {
    pub item: CartItem,
    /// Requested quantity. Not validated here; the quantity input enforces a
    /// minimum of one.
    pub quantity: Numeric,
}

impl StagedItem {
    /// Stage an item with the default quantity of one.
    #[must_use]
    pub fn new(item: CartItem) -> Self {
        Self {
            item,
            quantity: Numeric::from(1_u32),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.item.id
    }
}

/// Ordered, duplicate-free list of staged items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingList {
    items: Vec<StagedItem>,
}

impl StagingList {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[StagedItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|staged| staged.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&StagedItem> {
        self.items.iter().find(|staged| staged.id() == id)
    }

    /// Append `item` with quantity one unless it is already staged.
    ///
    /// Returns `true` if the item was added.
    pub fn add(&mut self, item: &CartItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(StagedItem::new(item.clone()));
        true
    }

    /// Replace the list with every available item in `cart`, each at
    /// quantity one. Unavailable items are skipped.
    pub fn set_from_available_cart(&mut self, cart: &[CartItem]) {
        self.items = cart
            .iter()
            .filter(|item| item.is_available())
            .cloned()
            .map(StagedItem::new)
            .collect();
    }

    /// Replace the quantity of a staged item.
    ///
    /// Returns `false` (and changes nothing) if `id` is not staged.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: Numeric) -> bool {
        match self.items.iter_mut().find(|staged| staged.id() == id) {
            Some(staged) => {
                staged.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a staged item. Idempotent; returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|staged| staged.id() != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
