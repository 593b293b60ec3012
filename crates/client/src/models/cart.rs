//! Cart line item and product payload types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use starfruit_core::{Price, ProductId};

/// A product payload as handed to `add_to_cart`.
///
/// This mirrors what catalog endpoints return: the image may arrive under
/// either `imageName` or `imageUrl` depending on the endpoint, and the price
/// may be a number or a numeric string (see [`Price`]).
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Product identifier, the cart merge key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image file name, when the endpoint provides one.
    #[serde(rename = "imageName")]
    pub image_name: Option<String>,
    /// Image URL, the alternate field some endpoints use.
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl Product {
    /// Resolve the image reference, preferring `imageName` over `imageUrl`.
    #[must_use]
    pub fn resolved_image(&self) -> Option<String> {
        self.image_name
            .clone()
            .or_else(|| self.image_url.clone())
            .filter(|s| !s.is_empty())
    }
}

/// A single product line entry in the persisted cart.
///
/// Invariants, maintained by the cart manager:
/// - at most one `CartItem` per distinct `id` in a cart
/// - `quantity` is never persisted as zero (zero collapses to removal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Display name, frozen at the time the item was added.
    pub name: String,
    /// Unit price, frozen at the time the item was added.
    pub price: Price,
    /// Resolved image reference, if the product had one.
    #[serde(rename = "imageName", skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    /// Number of units; always positive.
    pub quantity: u32,
}

impl CartItem {
    /// Build a new line from a product payload.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_name: product.resolved_image(),
            quantity,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount() * Decimal::from(self.quantity)
    }
}
