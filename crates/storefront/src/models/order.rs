//! Order submission records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quikmart_core::{CurrencyCode, Numeric, OrderStatus, ProductId, UserId, VendorId};

/// One product line inside an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProduct {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub title: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub price: Numeric,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub quantity: Numeric,
}

impl OrderProduct {
    /// `quantity * price`, with non-numeric values counted as zero.
    ///
    /// Saturates at `Decimal::MAX` (or `MIN`) instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.quantity
            .to_decimal()
            .saturating_mul(self.price.to_decimal())
    }
}

/// Order sent to a single vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Shopper placing the order.
    pub from: UserId,
    pub from_name: String,
    /// Vendor receiving the order.
    pub to: VendorId,
    pub to_name: String,
    pub status: OrderStatus,
    pub products: Vec<OrderProduct>,
}

/// An order the shopper has successfully submitted, as mirrored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    #[serde(flatten)]
    pub order: OrderPayload,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_wire_names() {
        let payload = OrderPayload {
            from: UserId::new("u1"),
            from_name: "Asha".to_string(),
            to: VendorId::new("v1"),
            to_name: "Ratnagiri Farms".to_string(),
            status: OrderStatus::Pending,
            products: vec![OrderProduct {
                id: ProductId::new("p1"),
                title: "Mangoes".to_string(),
                description: "1 dozen".to_string(),
                price: Numeric::from(450_u32),
                currency: CurrencyCode::new("INR"),
                quantity: Numeric::from(2_u32),
            }],
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "from": "u1",
                "fromName": "Asha",
                "to": "v1",
                "toName": "Ratnagiri Farms",
                "status": "pending",
                "products": [{
                    "_id": "p1",
                    "title": "Mangoes",
                    "desc": "1 dozen",
                    "price": 450,
                    "currency": "INR",
                    "quantity": 2
                }]
            })
        );
    }

    #[test]
    fn test_line_total_coerces_garbage() {
        let product = OrderProduct {
            id: ProductId::new("p1"),
            title: String::new(),
            description: String::new(),
            price: Numeric::from("abc"),
            currency: CurrencyCode::default(),
            quantity: Numeric::from(3_u32),
        };
        assert_eq!(product.line_total(), Decimal::ZERO);
    }

    #[test]
    fn test_placed_order_flattens() {
        let value = json!({
            "from": "u1",
            "fromName": "Asha",
            "to": "v1",
            "toName": "Farm",
            "status": "pending",
            "products": [],
            "createdAt": "2026-10-14T09:30:00Z"
        });
        let placed: PlacedOrder = serde_json::from_value(value).unwrap();
        assert_eq!(placed.order.to, VendorId::new("v1"));
        assert_eq!(placed.created_at.to_rfc3339(), "2026-10-14T09:30:00+00:00");
    }
}
