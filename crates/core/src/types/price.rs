//! Non-negative price type backed by decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The input could not be parsed as a decimal amount.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative price in the currency's standard unit.
///
/// Backend payloads are inconsistent about price shape: some endpoints emit a
/// JSON number, others a numeric string. `Price` accepts both on the wire and
/// always serializes as a string to keep decimal precision intact.
///
/// ## Examples
///
/// ```
/// use starfruit_core::Price;
///
/// let from_number: Price = serde_json::from_str("19.99").unwrap();
/// let from_string: Price = serde_json::from_str("\"19.99\"").unwrap();
/// assert_eq!(from_number, from_string);
///
/// // Negative amounts are rejected
/// assert!(serde_json::from_str::<Price>("\"-1\"").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: Decimal = s
            .parse()
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let amount = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Decimal::from_f64(n)
                .ok_or_else(|| de::Error::custom(format!("invalid price: {n}")))?,
            Raw::Text(s) => s
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid price: {s}")))?,
        };

        Self::new(amount).map_err(de::Error::custom)
    }
}
