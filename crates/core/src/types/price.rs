//! Type-safe price representation using decimal arithmetic.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// Currency code as listed by the vendor.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }
}

impl fmt::Display for Price {
    /// Two decimal places followed by the code, e.g. `25.00 INR`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.amount.round_dp(2);
        if self.currency_code.as_str().is_empty() {
            write!(f, "{amount:.2}")
        } else {
            write!(f, "{amount:.2} {}", self.currency_code)
        }
    }
}

/// Currency code attached to a product listing.
///
/// Vendors enter the code free-form (`"INR"`, `"USD"`, ...), so this is an
/// uppercase-normalized string rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code, trimming and uppercasing the input.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_normalizes() {
        assert_eq!(CurrencyCode::new(" inr ").as_str(), "INR");
    }

    #[test]
    fn test_price_display() {
        let price = Price::new(Decimal::new(125, 2), CurrencyCode::new("usd"));
        assert_eq!(price.to_string(), "1.25 USD");

        let bare = Price::new(Decimal::from(25), CurrencyCode::default());
        assert_eq!(bare.to_string(), "25.00");
    }
}
