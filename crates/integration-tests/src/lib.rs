//! Integration tests for Nepali Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nepali-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end store behaviour against the built-in catalog
//! - `cart_properties` - Property tests over random operation sequences
//! - `file_persistence` - Reload and multi-session behaviour on disk
//!
//! This library holds the shared fixtures: recording collaborators and store
//! constructors.

use std::cell::RefCell;
use std::rc::Rc;

use nepali_shop_cart::{
    CartConfig, CartStore, CartView, Feedback, HapticPattern, KeyValueStore, MemoryStorage,
    Presenter, StaticCatalog, Toast,
};

/// Feedback port that records every requested pattern.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub pulses: Vec<HapticPattern>,
}

impl Feedback for RecordingFeedback {
    fn pulse(&mut self, pattern: HapticPattern) -> bool {
        self.pulses.push(pattern);
        true
    }
}

/// Presenter that records renders and toasts.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub renders: Vec<CartView>,
    pub toasts: Vec<String>,
}

impl RecordingPresenter {
    /// Create a shared presenter: subscribe one clone, inspect the other.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// The badge count from the most recent render.
    #[must_use]
    pub fn badge(&self) -> Option<u64> {
        self.renders.last().map(|view| view.item_count)
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, view: &CartView) {
        self.renders.push(view.clone());
    }

    fn show_toast(&mut self, toast: &Toast) {
        self.toasts.push(toast.message.clone());
    }
}

pub type TestStore<S> = CartStore<S, StaticCatalog, RecordingFeedback>;

/// Open a store over `storage` with the built-in catalog and default config.
pub fn open_store<S: KeyValueStore>(storage: S) -> TestStore<S> {
    CartStore::open(
        CartConfig::default(),
        storage,
        StaticCatalog::nepali_crafts(),
        RecordingFeedback::default(),
    )
}

/// Open a store over fresh in-memory storage.
#[must_use]
pub fn memory_store() -> (TestStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    (open_store(storage.clone()), storage)
}
