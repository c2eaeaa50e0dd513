//! Cart line items.

use serde::{Deserialize, Serialize};

use quikmart_core::{Availability, CurrencyCode, Numeric, Price, ProductId, VendorId};

/// A product sitting in a shopper's cart (or wishlist).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Numeric,
    #[serde(default)]
    pub currency: CurrencyCode,
    /// Vendor that listed the product.
    pub owner: VendorId,
    #[serde(rename = "ownerName", default)]
    pub owner_name: String,
    #[serde(default)]
    pub availability: Availability,
}

impl CartItem {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    /// Unit price with its currency, coercing a garbled price to zero.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::new(self.price.to_decimal(), self.currency.clone())
    }
}
