//! Lenient numeric values.
//!
//! Prices, quantities and coin balances reach the client as JSON numbers,
//! numeric strings, or whatever a shopper typed into a quantity field. The
//! raw value is preserved so it can be echoed back to the API unchanged,
//! while arithmetic goes through [`Numeric::to_decimal`], which coerces
//! anything that is not a finite number to zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A number as it appeared on the wire.
///
/// Missing fields deserialize to `Numeric::default()` (JSON `null`), which
/// coerces to zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Numeric(Value);

impl Numeric {
    /// Wrap a raw JSON value.
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The raw value as received.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Interpret the value as a decimal, coercing non-numeric input to zero.
    ///
    /// - numbers convert directly
    /// - strings are trimmed and parsed (plain or scientific notation); an
    ///   empty string is zero
    /// - `true` is one, every other value is zero
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        self.try_decimal().unwrap_or(Decimal::ZERO)
    }

    /// Interpret the value as a decimal, or `None` if it is not numeric.
    #[must_use]
    pub fn try_decimal(&self) -> Option<Decimal> {
        match &self.0 {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Decimal::from(u))
                } else {
                    n.as_f64().and_then(Decimal::from_f64)
                }
            }
            Value::String(s) => parse_decimal(s),
            Value::Bool(true) => Some(Decimal::ONE),
            Value::Bool(false) => Some(Decimal::ZERO),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

impl From<u32> for Numeric {
    fn from(n: u32) -> Self {
        Self(Value::from(n))
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_owned()))
    }
}

impl From<Decimal> for Numeric {
    /// Integral decimals become JSON integers; everything else a JSON float.
    fn from(d: Decimal) -> Self {
        let normalized = d.normalize();
        if normalized.fract().is_zero()
            && let Some(i) = normalized.to_i64()
        {
            return Self(Value::from(i));
        }
        Self(
            normalized
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .map_or(Value::Null, Value::Number),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numeric(value: Value) -> Numeric {
        Numeric::from_value(value)
    }

    #[test]
    fn test_numbers_convert() {
        assert_eq!(numeric(json!(10)).to_decimal(), Decimal::from(10));
        assert_eq!(numeric(json!(2.5)).to_decimal(), Decimal::new(25, 1));
    }

    #[test]
    fn test_numeric_strings_parse() {
        assert_eq!(numeric(json!("3")).to_decimal(), Decimal::from(3));
        assert_eq!(numeric(json!(" 4.75 ")).to_decimal(), Decimal::new(475, 2));
        assert_eq!(numeric(json!("1e2")).to_decimal(), Decimal::from(100));
        assert_eq!(numeric(json!("")).to_decimal(), Decimal::ZERO);
    }

    #[test]
    fn test_garbage_coerces_to_zero() {
        assert_eq!(numeric(json!("abc")).to_decimal(), Decimal::ZERO);
        assert_eq!(numeric(json!(null)).to_decimal(), Decimal::ZERO);
        assert_eq!(numeric(json!([1, 2])).to_decimal(), Decimal::ZERO);
        assert_eq!(numeric(json!({"n": 1})).to_decimal(), Decimal::ZERO);
        assert_eq!(Numeric::default().to_decimal(), Decimal::ZERO);
        assert!(numeric(json!("abc")).try_decimal().is_none());
    }

    #[test]
    fn test_raw_value_round_trips() {
        let parsed: Numeric = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"7\"");
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Numeric::from(Decimal::new(1250, 3)).as_value(), &json!(1.25));
        assert_eq!(Numeric::from(Decimal::new(300, 2)).as_value(), &json!(3));
    }
}
