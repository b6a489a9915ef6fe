//! Cart view model for presentation layers.
//!
//! Presenters receive a [`CartView`] rather than the raw state: prices are
//! already formatted and the empty-cart case is explicit.

use nepali_shop_core::{CartState, CurrencyCode, LineItem, Price, ProductId};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Formatted unit price.
    pub price: String,
    /// Formatted unit price × quantity.
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    /// Badge count: total quantity across all lines.
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::zero(currency).display(),
            item_count: 0,
        }
    }

    /// Build a view of `cart` with prices in `currency`.
    #[must_use]
    pub fn from_state(cart: &CartState, currency: CurrencyCode) -> Self {
        if cart.is_empty() {
            return Self::empty(currency);
        }

        Self {
            items: cart
                .iter()
                .map(|item| CartItemView::from_line_item(item, currency))
                .collect(),
            subtotal: Price::new(cart.total(), currency).display(),
            item_count: cart.total_item_count(),
        }
    }

    /// Whether to show the empty-cart state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItemView {
    fn from_line_item(item: &LineItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            image: item.image().to_string(),
            quantity: item.quantity(),
            price: Price::new(item.price(), currency).display(),
            line_price: Price::new(item.subtotal(), currency).display(),
        }
    }

    /// Quantity to request from a "−" control; zero removes the line.
    #[must_use]
    pub const fn decrement_target(&self) -> u32 {
        self.quantity.saturating_sub(1)
    }

    /// Quantity to request from a "+" control.
    #[must_use]
    pub const fn increment_target(&self) -> u32 {
        self.quantity.saturating_add(1)
    }
}
