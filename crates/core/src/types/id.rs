//! Product identifiers.
//!
//! Backend payloads are inconsistent about identifier shape: catalog endpoints
//! emit numeric IDs while some product feeds emit string handles. [`ProductId`]
//! accepts either on the wire and compares structurally, so the cart merge key
//! works regardless of which shape a given payload used.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a product, numeric or string on the wire.
///
/// Equality is the cart merge key: two cart lines with equal IDs are the same
/// product and must be collapsed into one.
///
/// # Example
///
/// ```
/// use starfruit_core::ProductId;
///
/// let numeric: ProductId = serde_json::from_str("42").unwrap();
/// let text: ProductId = serde_json::from_str("\"sku-42\"").unwrap();
///
/// assert_eq!(numeric, ProductId::from(42));
/// assert_eq!(text, ProductId::from("sku-42"));
/// assert_ne!(numeric, text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric identifier (catalog IDs).
    Number(i64),
    /// String identifier (handles, SKUs).
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric() {
        let id: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(id, ProductId::Number(7));
    }

    #[test]
    fn test_deserialize_string() {
        let id: ProductId = serde_json::from_str("\"prod-7\"").unwrap();
        assert_eq!(id, ProductId::Text("prod-7".to_owned()));
    }

    #[test]
    fn test_numeric_and_text_are_distinct() {
        assert_ne!(ProductId::from(7), ProductId::from("7"));
    }

    #[test]
    fn test_serialize_transparent() {
        assert_eq!(serde_json::to_string(&ProductId::from(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&ProductId::from("sku")).unwrap(),
            "\"sku\""
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductId::from(7).to_string(), "7");
        assert_eq!(ProductId::from("sku").to_string(), "sku");
    }
}
