//! The cart store.
//!
//! `CartStore` owns the session's [`CartState`] and is the only way to
//! change it. Every successful mutation runs the same sequence:
//!
//! 1. mutate the in-memory state
//! 2. persist the snapshot (failures are logged, memory stays authoritative)
//! 3. re-render every subscribed [`Presenter`]
//! 4. request a best-effort feedback pulse and show a toast, where applicable
//!
//! Nothing here panics or surfaces a blocking error: unknown products and bad
//! quantities are logged no-ops reported through `Err`, storage problems are
//! logged and swallowed, and a corrupt snapshot loads as an empty cart.

use core::fmt;
use core::num::NonZeroU32;

use nepali_shop_core::{CartState, CartStateError, LineItem, Price, ProductId};
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::Catalog;
use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::haptics::{Feedback, HapticPattern};
use crate::presenter::{CLEARED_MESSAGE, Presenter, Toast, added_message, removed_message};
use crate::snapshot;
use crate::storage::KeyValueStore;
use crate::view::CartView;

/// What [`CartStore::load`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid snapshot with this many line items was restored.
    Restored(usize),
    /// Nothing was stored yet.
    Missing,
    /// The snapshot was unreadable or invalid and was discarded.
    Discarded,
}

/// Session cart store with injected storage, catalog and feedback ports.
pub struct CartStore<S, C, F> {
    config: CartConfig,
    storage: S,
    catalog: C,
    feedback: F,
    state: CartState,
    presenters: Vec<Box<dyn Presenter>>,
    persisted: bool,
    last_toast: Option<Toast>,
}

impl<S, C, F> fmt::Debug for CartStore<S, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("presenters", &self.presenters.len())
            .field("persisted", &self.persisted)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore, C: Catalog, F: Feedback> CartStore<S, C, F> {
    /// Create a store with an empty cart. Nothing is read from storage.
    pub fn new(config: CartConfig, storage: S, catalog: C, feedback: F) -> Self {
        Self {
            config,
            storage,
            catalog,
            feedback,
            state: CartState::new(),
            presenters: Vec::new(),
            persisted: false,
            last_toast: None,
        }
    }

    /// Create a store and hydrate it from storage.
    pub fn open(config: CartConfig, storage: S, catalog: C, feedback: F) -> Self {
        let mut store = Self::new(config, storage, catalog, feedback);
        store.load();
        store
    }

    /// Register a presenter. It is rendered immediately and after every change.
    pub fn subscribe(&mut self, presenter: impl Presenter + 'static) {
        let mut presenter = Box::new(presenter);
        presenter.render(&self.view());
        self.presenters.push(presenter);
    }

    /// Replace the in-memory cart with the persisted snapshot.
    ///
    /// Never fails: a missing key gives an empty cart, and an unreadable or
    /// invalid snapshot is discarded (logged) in favour of an empty cart.
    #[instrument(skip(self), fields(key = %self.config.storage_key))]
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.read_snapshot() {
            Ok(Some(state)) => {
                let count = state.len();
                info!(items = count, "Cart loaded from storage");
                self.state = state;
                self.persisted = true;
                LoadOutcome::Restored(count)
            }
            Ok(None) => {
                debug!("No saved cart found");
                self.state = CartState::new();
                self.persisted = true;
                LoadOutcome::Missing
            }
            Err(e) => {
                error!(error = %e, "Discarding unreadable cart snapshot");
                self.state = CartState::new();
                self.persisted = false;
                LoadOutcome::Discarded
            }
        };
        self.render();
        outcome
    }

    fn read_snapshot(&self) -> Result<Option<CartState>> {
        let Some(payload) = self.storage.get(&self.config.storage_key)? else {
            return Ok(None);
        };
        Ok(Some(snapshot::decode(&payload)?))
    }

    /// Write the current cart to storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Persistence` if the backend rejects the write. The
    /// in-memory cart is unaffected either way.
    pub fn save(&mut self) -> Result<()> {
        let result = snapshot::encode(&self.state)
            .map_err(CartError::from)
            .and_then(|payload| {
                self.storage
                    .set(&self.config.storage_key, &payload)
                    .map_err(CartError::from)
            });
        self.persisted = result.is_ok();
        result
    }

    /// Save, logging rather than returning a failure.
    fn persist(&mut self) {
        match self.save() {
            Ok(()) => debug!(items = self.state.len(), "Cart saved to storage"),
            Err(e) => error!(error = %e, "Failed to save cart, keeping in-memory state"),
        }
    }

    /// Add `quantity` of a catalog product, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for zero or for a quantity that
    /// would overflow the cart total, and `CartError::ProductNotFound` for an
    /// ID the catalog does not know. All leave the cart untouched.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32) -> Result<()> {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            warn!("Refusing to add zero quantity");
            return Err(CartError::InvalidQuantity(quantity.to_string()));
        };
        let Some(product) = self.catalog.find_by_id(product_id) else {
            warn!("Product not found");
            return Err(CartError::ProductNotFound(product_id));
        };

        let new_quantity = self.state.add(&product, quantity).map_err(|e| {
            warn!(error = %e, "Refusing to add");
            CartError::InvalidQuantity(quantity.to_string())
        })?;
        info!(product = %product.name, quantity = new_quantity, "Added to cart");

        self.persist();
        self.render();
        self.feedback.pulse(HapticPattern::AddToCart);
        self.toast(added_message(&product.name));
        Ok(())
    }

    /// Remove a product's line item, returning it if it was in the cart.
    ///
    /// A missing product still persists, re-renders and confirms with a
    /// generic item name.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) -> Option<LineItem> {
        let removed = self.state.remove(product_id);
        match &removed {
            Some(item) => info!(product = %item.name(), "Removed from cart"),
            None => debug!("Remove requested for product not in cart"),
        }

        self.persist();
        self.render();
        self.feedback.pulse(HapticPattern::RemoveFromCart);
        self.toast(removed_message(removed.as_ref().map(LineItem::name)));
        removed
    }

    /// Set a line item's quantity. Zero or below removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if a positive quantity targets a
    /// product not in the cart, and `CartError::InvalidQuantity` if it exceeds
    /// `u32::MAX` or would overflow the cart total. All leave the cart
    /// untouched.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) -> Result<()> {
        if new_quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        let quantity = u32::try_from(new_quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| CartError::InvalidQuantity(new_quantity.to_string()))?;

        let item = match self.state.set_quantity(product_id, quantity) {
            Ok(item) => item,
            Err(CartStateError::NotInCart(_)) => {
                warn!("Quantity update for product not in cart");
                return Err(CartError::ProductNotFound(product_id));
            }
            Err(e) => {
                warn!(error = %e, "Refusing quantity update");
                return Err(CartError::InvalidQuantity(new_quantity.to_string()));
            }
        };
        info!(product = %item.name(), quantity = item.quantity(), "Updated quantity");

        self.persist();
        self.render();
        Ok(())
    }

    /// [`CartStore::update_quantity`] for raw text from a quantity input.
    ///
    /// The text is read the way a browser reads a numeric form field: leading
    /// whitespace and sign, then the leading run of digits ("3.7" is 3).
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if no integer can be read, plus
    /// the errors of [`CartStore::update_quantity`].
    pub fn update_quantity_input(&mut self, product_id: ProductId, input: &str) -> Result<()> {
        let Some(quantity) = parse_quantity(input) else {
            warn!(%product_id, input, "Ignoring non-numeric quantity");
            return Err(CartError::InvalidQuantity(input.to_string()));
        };
        self.update_quantity(product_id, quantity)
    }

    /// Empty the cart after the caller confirms.
    ///
    /// `confirm` receives the configured prompt and returns whether the user
    /// agreed. Returns `true` if the cart was cleared.
    #[instrument(skip(self, confirm))]
    pub fn clear(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(&self.config.clear_prompt) {
            debug!("Clear declined");
            return false;
        }

        self.state.clear();
        info!("Cart cleared");

        self.persist();
        self.render();
        self.toast(CLEARED_MESSAGE.to_string());
        true
    }

    /// Sum of unit price × quantity, in the configured currency.
    #[must_use]
    pub fn total(&self) -> Price {
        Price::new(self.state.total(), self.config.currency)
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.state.total_item_count()
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from_state(&self.state, self.config.currency)
    }

    /// Whether storage holds the current cart (the last save succeeded).
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// The most recent confirmation toast.
    #[must_use]
    pub const fn last_toast(&self) -> Option<&Toast> {
        self.last_toast.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &CartConfig {
        &self.config
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn feedback(&self) -> &F {
        &self.feedback
    }

    fn render(&mut self) {
        if self.presenters.is_empty() {
            return;
        }
        let view = self.view();
        for presenter in &mut self.presenters {
            presenter.render(&view);
        }
    }

    fn toast(&mut self, message: String) {
        let toast = Toast::new(message, self.config.toast_duration());
        for presenter in &mut self.presenters {
            presenter.show_toast(&toast);
        }
        self.last_toast = Some(toast);
    }
}

/// Read a leading integer the way `parseInt` does.
///
/// Values beyond `i64` saturate, so an absurdly large negative still means
/// "remove" and an absurdly large positive is rejected downstream.
fn parse_quantity(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = rest.get(..end).filter(|d| !d.is_empty())?;

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::haptics::NoFeedback;
    use crate::storage::MemoryStorage;
    use rust_decimal_macros::dec;

    #[derive(Debug, Default)]
    struct RecordingFeedback {
        pulses: Vec<HapticPattern>,
    }

    impl Feedback for RecordingFeedback {
        fn pulse(&mut self, pattern: HapticPattern) -> bool {
            self.pulses.push(pattern);
            true
        }
    }

    #[derive(Debug, Default)]
    struct RecordingPresenter {
        renders: Vec<CartView>,
        toasts: Vec<String>,
    }

    impl Presenter for RecordingPresenter {
        fn render(&mut self, view: &CartView) {
            self.renders.push(view.clone());
        }

        fn show_toast(&mut self, toast: &Toast) {
            self.toasts.push(toast.message.clone());
        }
    }

    type TestStore = CartStore<MemoryStorage, StaticCatalog, RecordingFeedback>;

    fn store_with(storage: MemoryStorage) -> TestStore {
        CartStore::open(
            CartConfig::default(),
            storage,
            StaticCatalog::nepali_crafts(),
            RecordingFeedback::default(),
        )
    }

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_add_merges_and_totals() {
        let mut store = store_with(MemoryStorage::new());
        store.add_item(id(1), 1).unwrap();
        store.add_item(id(2), 2).unwrap();

        assert_eq!(store.total().amount, dec!(105.99));
        assert_eq!(store.total().display(), "£105.99");
        assert_eq!(store.total_item_count(), 3);

        store.add_item(id(2), 1).unwrap();
        assert_eq!(store.state().len(), 2);
        assert_eq!(store.state().get(id(2)).map(LineItem::quantity), Some(3));
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let storage = MemoryStorage::new();
        let mut store = store_with(storage.clone());

        let result = store.add_item(id(99), 1);
        assert!(matches!(result, Err(CartError::ProductNotFound(p)) if p == id(99)));
        assert!(store.state().is_empty());
        assert_eq!(storage.write_count(), 0);
        assert!(store.feedback().pulses.is_empty());
        assert!(store.last_toast().is_none());
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut store = store_with(MemoryStorage::new());
        assert!(matches!(
            store.add_item(id(1), 0),
            Err(CartError::InvalidQuantity(_))
        ));
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_add_and_update_refuse_overflowing_total() {
        let gold = nepali_shop_core::Product {
            id: id(1),
            name: "Solid Gold Buddha".to_string(),
            price: rust_decimal::Decimal::MAX,
            image: "images/products/gold.jpg".to_string(),
            description: String::new(),
            cultural_context: String::new(),
            category: nepali_shop_core::Category::Art,
            in_stock: true,
        };
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(
            CartConfig::default(),
            storage.clone(),
            StaticCatalog::new(vec![gold]).unwrap(),
            RecordingFeedback::default(),
        );

        store.add_item(id(1), 1).unwrap();
        assert!(matches!(
            store.add_item(id(1), 1),
            Err(CartError::InvalidQuantity(_))
        ));
        assert!(matches!(
            store.update_quantity(id(1), 2),
            Err(CartError::InvalidQuantity(_))
        ));

        assert_eq!(store.state().get(id(1)).map(LineItem::quantity), Some(1));
        assert_eq!(store.total().amount, rust_decimal::Decimal::MAX);
        assert_eq!(storage.write_count(), 1);
        assert_eq!(store.feedback().pulses.len(), 1);
    }

    #[test]
    fn test_add_side_effects() {
        let storage = MemoryStorage::new();
        let mut store = store_with(storage.clone());
        let presenter = Rc::new(RefCell::new(RecordingPresenter::default()));
        store.subscribe(Rc::clone(&presenter));

        store.add_item(id(3), 1).unwrap();

        assert_eq!(storage.write_count(), 1);
        assert!(store.is_persisted());
        assert_eq!(store.feedback().pulses, vec![HapticPattern::AddToCart]);
        assert_eq!(
            store.last_toast().map(|t| t.message.as_str()),
            Some("✓ Pashmina Shawl added to cart")
        );

        let presenter = presenter.borrow();
        // Initial render on subscribe, then one per mutation.
        assert_eq!(presenter.renders.len(), 2);
        assert_eq!(presenter.renders.last().map(|v| v.item_count), Some(1));
        assert_eq!(presenter.toasts, vec!["✓ Pashmina Shawl added to cart"]);
    }

    #[test]
    fn test_remove_item() {
        let mut store = store_with(MemoryStorage::new());
        store.add_item(id(5), 2).unwrap();

        let removed = store.remove_item(id(5)).unwrap();
        assert_eq!(removed.name(), "Khukuri Knife");
        assert!(store.state().is_empty());
        assert_eq!(
            store.last_toast().map(|t| t.message.as_str()),
            Some("✗ Khukuri Knife removed from cart")
        );
        assert_eq!(
            store.feedback().pulses,
            vec![HapticPattern::AddToCart, HapticPattern::RemoveFromCart]
        );
    }

    #[test]
    fn test_remove_missing_leaves_cart_unchanged() {
        let storage = MemoryStorage::new();
        let mut store = store_with(storage.clone());
        store.add_item(id(1), 1).unwrap();
        let before = store.state().clone();

        assert!(store.remove_item(id(4)).is_none());
        assert_eq!(store.state(), &before);
        assert_eq!(
            store.last_toast().map(|t| t.message.as_str()),
            Some("✗ Item removed from cart")
        );
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn test_update_quantity() {
        let mut store = store_with(MemoryStorage::new());
        store.add_item(id(1), 2).unwrap();

        store.update_quantity(id(1), 5).unwrap();
        assert_eq!(store.total_item_count(), 5);
        // Quantity changes neither buzz nor toast.
        assert_eq!(store.feedback().pulses, vec![HapticPattern::AddToCart]);

        assert!(matches!(
            store.update_quantity(id(2), 3),
            Err(CartError::ProductNotFound(_))
        ));
        assert!(matches!(
            store.update_quantity(id(1), i64::from(u32::MAX) + 1),
            Err(CartError::InvalidQuantity(_))
        ));
        assert_eq!(store.total_item_count(), 5);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut store = store_with(MemoryStorage::new());
        store.add_item(id(1), 2).unwrap();

        store.update_quantity(id(1), 0).unwrap();
        assert!(!store.state().contains(id(1)));
        assert_eq!(store.total_item_count(), 0);

        store.add_item(id(1), 2).unwrap();
        store.update_quantity(id(1), -4).unwrap();
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_update_quantity_input() {
        let mut store = store_with(MemoryStorage::new());
        store.add_item(id(1), 1).unwrap();

        store.update_quantity_input(id(1), " 3.7").unwrap();
        assert_eq!(store.total_item_count(), 3);

        assert!(matches!(
            store.update_quantity_input(id(1), "lots"),
            Err(CartError::InvalidQuantity(_))
        ));
        assert_eq!(store.total_item_count(), 3);

        store.update_quantity_input(id(1), "0").unwrap();
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("4"), Some(4));
        assert_eq!(parse_quantity("  +12abc"), Some(12));
        assert_eq!(parse_quantity("-2"), Some(-2));
        assert_eq!(parse_quantity("007"), Some(7));
        assert_eq!(parse_quantity("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_quantity("-99999999999999999999"), Some(-i64::MAX));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("-"), None);
        assert_eq!(parse_quantity("x1"), None);
        assert_eq!(parse_quantity(".5"), None);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut store = store_with(MemoryStorage::new());
        store.add_item(id(1), 1).unwrap();

        let mut asked = String::new();
        assert!(!store.clear(|prompt| {
            asked = prompt.to_string();
            false
        }));
        assert_eq!(asked, "Are you sure you want to clear your cart?");
        assert_eq!(store.total_item_count(), 1);

        assert!(store.clear(|_| true));
        assert!(store.state().is_empty());
        assert_eq!(
            store.last_toast().map(|t| t.message.as_str()),
            Some("Cart cleared")
        );
    }

    #[test]
    fn test_reload_reproduces_state() {
        let storage = MemoryStorage::new();
        let mut store = store_with(storage.clone());
        store.add_item(id(4), 2).unwrap();
        store.add_item(id(9), 1).unwrap();
        store.update_quantity(id(4), 3).unwrap();

        let mut reloaded = store_with(storage);
        assert_eq!(reloaded.state(), store.state());
        assert_eq!(reloaded.load(), LoadOutcome::Restored(2));
    }

    #[test]
    fn test_load_missing_snapshot() {
        let mut store = store_with(MemoryStorage::new());
        assert_eq!(store.load(), LoadOutcome::Missing);
        assert!(store.state().is_empty());
        assert!(store.is_persisted());
    }

    #[test]
    fn test_load_corrupted_snapshot_yields_empty_cart() {
        let storage = MemoryStorage::new();
        storage.set("nepaliShopCart", "{{{ not json").unwrap();

        let mut store = store_with(storage);
        assert!(store.state().is_empty());
        assert_eq!(store.load(), LoadOutcome::Discarded);
        assert!(!store.is_persisted());
    }

    #[test]
    fn test_load_read_failure_yields_empty_cart() {
        let storage = MemoryStorage::new();
        storage.set("nepaliShopCart", "[]").unwrap();
        storage.fail_reads(true);

        let mut store = store_with(storage);
        assert_eq!(store.load(), LoadOutcome::Discarded);
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_save_failure_keeps_memory_authoritative() {
        let storage = MemoryStorage::new();
        let mut store = store_with(storage.clone());
        storage.fail_writes(true);

        store.add_item(id(1), 1).unwrap();
        assert_eq!(store.total_item_count(), 1);
        assert!(!store.is_persisted());
        assert!(matches!(store.save(), Err(CartError::Persistence(_))));

        storage.fail_writes(false);
        store.add_item(id(1), 1).unwrap();
        assert!(store.is_persisted());
        assert_eq!(store_with(storage).total_item_count(), 2);
    }

    #[test]
    fn test_custom_storage_key() {
        let storage = MemoryStorage::new();
        let config = CartConfig {
            storage_key: "otherCart".to_string(),
            ..CartConfig::default()
        };
        let mut store = CartStore::open(
            config,
            storage.clone(),
            StaticCatalog::nepali_crafts(),
            NoFeedback,
        );
        store.add_item(id(1), 1).unwrap();

        assert!(storage.get("otherCart").unwrap().is_some());
        assert!(storage.get("nepaliShopCart").unwrap().is_none());
    }
}
