//! Catalog product reference data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Clothing,
    Spiritual,
    Crafts,
    Cultural,
    Accessories,
    Food,
    Art,
    Music,
}

impl Category {
    /// All categories in catalog display order.
    pub const ALL: [Self; 8] = [
        Self::Clothing,
        Self::Spiritual,
        Self::Crafts,
        Self::Cultural,
        Self::Accessories,
        Self::Food,
        Self::Art,
        Self::Music,
    ];

    /// Lowercase category name as used in catalog files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clothing => "clothing",
            Self::Spiritual => "spiritual",
            Self::Crafts => "crafts",
            Self::Cultural => "cultural",
            Self::Accessories => "accessories",
            Self::Food => "food",
            Self::Art => "art",
            Self::Music => "music",
        }
    }
}

/// A product in the read-only catalog.
///
/// Prices are plain decimals in the shop currency; the cart snapshots `name`,
/// `price` and `image` when an item is added and never re-syncs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cultural_context: String,
    pub category: Category,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}
