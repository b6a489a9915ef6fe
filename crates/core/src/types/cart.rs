//! Cart line items and the ordered cart state.
//!
//! `CartState` is the single source of truth for a session's cart. It holds
//! an ordered sequence of [`LineItem`]s with at most one entry per product,
//! and every entry has a quantity of at least one. Both invariants are
//! enforced by construction: quantities are `NonZeroU32` and the only way to
//! insert is through [`CartState::add`] (which merges) or
//! [`CartState::try_from_items`] (which rejects duplicates).
//!
//! The cart total always fits in a `Decimal`: line items whose subtotal would
//! overflow are refused, and so are additions or quantity changes that would
//! push the sum past `Decimal::MAX`.

use core::num::NonZeroU32;

use rust_decimal::Decimal;

use super::id::ProductId;
use super::product::Product;

/// Errors that can occur when building a [`LineItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineItemError {
    /// Quantity must be at least one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// Unit price must not be negative.
    #[error("price must not be negative, got {0}")]
    NegativePrice(Decimal),
    /// Price × quantity does not fit in a `Decimal`.
    #[error("subtotal of {price} x {quantity} overflows")]
    SubtotalOverflow { price: Decimal, quantity: u32 },
}

/// Errors that can occur when building a [`CartState`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartStateError {
    /// Two line items share a product ID.
    #[error("duplicate line item for product {0}")]
    DuplicateId(ProductId),
    /// The product has no line item.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
    /// The change would push the cart total past `Decimal::MAX`.
    #[error("cart total would overflow")]
    TotalOverflow,
}

fn checked_subtotal(price: Decimal, quantity: NonZeroU32) -> Option<Decimal> {
    price.checked_mul(Decimal::from(quantity.get()))
}

/// One product entry in the cart with its quantity.
///
/// `name`, `price` and `image` are a snapshot of the catalog product taken
/// when the item was first added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    id: ProductId,
    name: String,
    price: Decimal,
    image: String,
    quantity: NonZeroU32,
}

impl LineItem {
    /// Create a line item from raw parts.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is zero, `price` is negative, or their
    /// product overflows.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
        quantity: u32,
    ) -> Result<Self, LineItemError> {
        let quantity = NonZeroU32::new(quantity).ok_or(LineItemError::ZeroQuantity)?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(LineItemError::NegativePrice(price));
        }
        if checked_subtotal(price, quantity).is_none() {
            return Err(LineItemError::SubtotalOverflow {
                price,
                quantity: quantity.get(),
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
            quantity,
        })
    }

    /// Snapshot a catalog product into a new line item.
    #[must_use]
    pub fn from_product(product: &Product, quantity: NonZeroU32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// The full ordered collection of line items at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from already-validated line items, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if two items share a product ID or the total
    /// overflows.
    pub fn try_from_items(items: Vec<LineItem>) -> Result<Self, CartStateError> {
        for (index, item) in items.iter().enumerate() {
            if items.iter().take(index).any(|seen| seen.id == item.id) {
                return Err(CartStateError::DuplicateId(item.id));
            }
        }
        let cart = Self { items };
        cart.checked_total().ok_or(CartStateError::TotalOverflow)?;
        Ok(cart)
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Add `quantity` of a product.
    ///
    /// Increments the existing line item if the product is already in the
    /// cart (saturating at `u32::MAX`), otherwise appends a new line item
    /// snapshotting the product. Returns the resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartStateError::TotalOverflow` and leaves the cart unchanged
    /// if the new total would not fit in a `Decimal`.
    pub fn add(&mut self, product: &Product, quantity: NonZeroU32) -> Result<u32, CartStateError> {
        let (price, new_quantity) = match self.get(product.id) {
            Some(item) => (item.price, item.quantity.saturating_add(quantity.get())),
            None => (product.price, quantity),
        };
        self.ensure_total_fits(product.id, price, new_quantity)?;

        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity = new_quantity,
            None => self.items.push(LineItem::from_product(product, quantity)),
        }
        Ok(new_quantity.get())
    }

    /// Remove the line item for `id`, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Set the quantity of an existing line item, returning the updated item.
    ///
    /// # Errors
    ///
    /// Returns `CartStateError::NotInCart` if the product has no line item and
    /// `CartStateError::TotalOverflow` if the new total would not fit in a
    /// `Decimal`. The cart is unchanged in both cases.
    pub fn set_quantity(
        &mut self,
        id: ProductId,
        quantity: NonZeroU32,
    ) -> Result<&LineItem, CartStateError> {
        let price = self.get(id).ok_or(CartStateError::NotInCart(id))?.price;
        self.ensure_total_fits(id, price, quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CartStateError::NotInCart(id))?;
        item.quantity = quantity;
        Ok(item)
    }

    /// Sum of unit price × quantity over all line items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.subtotal()))
    }

    fn checked_total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(checked_subtotal(item.price, item.quantity)?)
        })
    }

    /// Check the total with the line for `id` priced at `price` × `quantity`.
    fn ensure_total_fits(
        &self,
        id: ProductId,
        price: Decimal,
        quantity: NonZeroU32,
    ) -> Result<(), CartStateError> {
        let line = checked_subtotal(price, quantity).ok_or(CartStateError::TotalOverflow)?;
        self.items
            .iter()
            .filter(|item| item.id != id)
            .try_fold(line, |acc, item| {
                acc.checked_add(checked_subtotal(item.price, item.quantity)?)
            })
            .map(|_| ())
            .ok_or(CartStateError::TotalOverflow)
    }

    /// Sum of quantities over all line items.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a LineItem;
    type IntoIter = core::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::product::Category;
    use rust_decimal_macros::dec;

    fn product(id: i32, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price,
            image: format!("images/products/{id}.jpg"),
            description: String::new(),
            cultural_context: String::new(),
            category: Category::Crafts,
            in_stock: true,
        }
    }

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_line_item_rejects_zero_quantity() {
        let result = LineItem::new(ProductId::new(1), "Topi", dec!(15.99), "topi.jpg", 0);
        assert_eq!(result, Err(LineItemError::ZeroQuantity));
    }

    #[test]
    fn test_line_item_rejects_negative_price() {
        let result = LineItem::new(ProductId::new(1), "Topi", dec!(-1), "topi.jpg", 1);
        assert_eq!(result, Err(LineItemError::NegativePrice(dec!(-1))));
    }

    #[test]
    fn test_line_item_allows_free_items() {
        assert!(LineItem::new(ProductId::new(1), "Sticker", dec!(0), "s.jpg", 1).is_ok());
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = CartState::new();
        let topi = product(1, dec!(15.99));

        cart.add(&topi, qty(1)).unwrap();
        cart.add(&topi, qty(2)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).map(LineItem::quantity), Some(3));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = CartState::new();
        cart.add(&product(3, dec!(1)), qty(1)).unwrap();
        cart.add(&product(1, dec!(1)), qty(1)).unwrap();
        cart.add(&product(3, dec!(1)), qty(1)).unwrap();

        let ids: Vec<i32> = cart.iter().map(|item| item.id().as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_add_saturates_quantity() {
        let mut cart = CartState::new();
        let bowl = product(2, dec!(45));
        cart.add(&bowl, qty(u32::MAX)).unwrap();
        assert_eq!(cart.add(&bowl, qty(5)), Ok(u32::MAX));
    }

    #[test]
    fn test_snapshot_is_not_resynced() {
        let mut cart = CartState::new();
        let mut topi = product(1, dec!(15.99));
        cart.add(&topi, qty(1)).unwrap();

        topi.name = "Renamed".to_string();
        topi.price = dec!(99);
        cart.add(&topi, qty(1)).unwrap();

        let item = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(item.name(), "Product 1");
        assert_eq!(item.price(), dec!(15.99));
    }

    #[test]
    fn test_totals() {
        let mut cart = CartState::new();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.total_item_count(), 0);

        cart.add(&product(1, dec!(15.99)), qty(1)).unwrap();
        cart.add(&product(2, dec!(45.00)), qty(2)).unwrap();

        assert_eq!(cart.total(), dec!(105.99));
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_remove_and_set_quantity() {
        let mut cart = CartState::new();
        cart.add(&product(1, dec!(2)), qty(2)).unwrap();

        assert_eq!(
            cart.set_quantity(ProductId::new(9), qty(4)),
            Err(CartStateError::NotInCart(ProductId::new(9)))
        );
        assert_eq!(
            cart.set_quantity(ProductId::new(1), qty(4)).map(LineItem::quantity),
            Ok(4)
        );

        assert!(cart.remove(ProductId::new(9)).is_none());
        let removed = cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(removed.quantity(), 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_try_from_items_rejects_duplicates() {
        let a = LineItem::new(ProductId::new(1), "A", dec!(1), "a.jpg", 1).unwrap();
        let b = LineItem::new(ProductId::new(1), "B", dec!(2), "b.jpg", 1).unwrap();

        assert_eq!(
            CartState::try_from_items(vec![a.clone(), b]),
            Err(CartStateError::DuplicateId(ProductId::new(1)))
        );
        assert_eq!(CartState::try_from_items(vec![a]).map(|c| c.len()), Ok(1));
    }

    #[test]
    fn test_line_item_rejects_overflowing_subtotal() {
        let result = LineItem::new(ProductId::new(1), "Gold", Decimal::MAX, "g.jpg", 2);
        assert_eq!(
            result,
            Err(LineItemError::SubtotalOverflow {
                price: Decimal::MAX,
                quantity: 2
            })
        );
    }

    #[test]
    fn test_try_from_items_rejects_overflowing_total() {
        let half = Decimal::MAX / dec!(2) + dec!(1);
        let a = LineItem::new(ProductId::new(1), "A", half, "a.jpg", 1).unwrap();
        let b = LineItem::new(ProductId::new(2), "B", half, "b.jpg", 1).unwrap();

        assert_eq!(
            CartState::try_from_items(vec![a, b]),
            Err(CartStateError::TotalOverflow)
        );
    }

    #[test]
    fn test_add_refuses_overflow_and_leaves_cart_unchanged() {
        let mut cart = CartState::new();
        let gold = product(1, Decimal::MAX);
        cart.add(&gold, qty(1)).unwrap();

        assert_eq!(cart.add(&gold, qty(1)), Err(CartStateError::TotalOverflow));
        assert_eq!(
            cart.add(&product(2, dec!(1)), qty(1)),
            Err(CartStateError::TotalOverflow)
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_set_quantity_refuses_overflow() {
        let mut cart = CartState::new();
        let big = Decimal::MAX / dec!(2);
        cart.add(&product(1, big), qty(1)).unwrap();

        assert_eq!(
            cart.set_quantity(ProductId::new(1), qty(3)),
            Err(CartStateError::TotalOverflow)
        );
        assert_eq!(cart.get(ProductId::new(1)).map(LineItem::quantity), Some(1));
    }
}
