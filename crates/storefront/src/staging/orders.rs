//! Per-vendor order derivation and reward computation.

use std::collections::HashMap;

use rust_decimal::Decimal;

use quikmart_core::{OrderStatus, VendorId};

use super::StagedItem;
use crate::models::{OrderPayload, OrderProduct, User};

/// Group staged items by vendor into one pending order per vendor.
///
/// Vendors appear in the order they are first seen in `staged`, and each
/// order lists its products in staging order. The recipient display name is
/// taken from the first staged item of that vendor. Every staged item lands
/// in exactly one order.
///
/// An empty staging list yields no orders; callers must not submit in that
/// case.
#[must_use]
pub fn build_order_payloads(staged: &[StagedItem], user: &User) -> Vec<OrderPayload> {
    let mut orders: Vec<OrderPayload> = Vec::new();
    let mut by_vendor: HashMap<&VendorId, usize> = HashMap::new();

    for staged_item in staged {
        let item = &staged_item.item;
        let product = OrderProduct {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            price: item.price.clone(),
            currency: item.currency.clone(),
            quantity: staged_item.quantity.clone(),
        };

        if let Some(order) = by_vendor
            .get(&item.owner)
            .and_then(|&index| orders.get_mut(index))
        {
            order.products.push(product);
            continue;
        }

        by_vendor.insert(&item.owner, orders.len());
        orders.push(OrderPayload {
            from: user.id.clone(),
            from_name: user.name.clone(),
            to: item.owner.clone(),
            to_name: item.owner_name.clone(),
            status: OrderStatus::Pending,
            products: vec![product],
        });
    }

    orders
}

/// Sum of `quantity * price` over every product of every order.
///
/// Missing or non-numeric quantities and prices count as zero. Totals past
/// the `Decimal` range saturate at `Decimal::MAX` (or `MIN`).
#[must_use]
pub fn order_total(orders: &[OrderPayload]) -> Decimal {
    orders
        .iter()
        .flat_map(|order| &order.products)
        .map(OrderProduct::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Reward coins earned for submitting `orders`: the order total times `rate`.
///
/// The result is the amount to add to the shopper's existing balance. Like
/// [`order_total`] it saturates rather than overflowing.
#[must_use]
pub fn compute_reward(orders: &[OrderPayload], rate: Decimal) -> Decimal {
    order_total(orders).saturating_mul(rate)
}
