//! Nepali Shop Cart - session cart store with local persistence.
//!
//! The [`CartStore`] owns one shopping cart, keeps it in a durable key-value
//! store across reloads, and tells the presentation layer about every change.
//! Its collaborators are injected as ports:
//!
//! - [`KeyValueStore`] - durable storage (browser-style local storage)
//! - [`Catalog`] - read-only product lookup
//! - [`Feedback`] - best-effort device feedback (see [`HapticFeedback`])
//! - [`Presenter`] - re-renders the badge and line list, shows toasts
//!
//! # Example
//!
//! ```rust
//! use nepali_shop_cart::{CartConfig, CartStore, MemoryStorage, NoFeedback, StaticCatalog};
//! use nepali_shop_core::ProductId;
//!
//! let mut cart = CartStore::open(
//!     CartConfig::default(),
//!     MemoryStorage::new(),
//!     StaticCatalog::nepali_crafts(),
//!     NoFeedback,
//! );
//! cart.add_item(ProductId::new(1), 1).ok();
//! cart.add_item(ProductId::new(2), 2).ok();
//! assert_eq!(cart.total().display(), "£105.99");
//! assert_eq!(cart.total_item_count(), 3);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod haptics;
pub mod presenter;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod view;

pub use catalog::{Catalog, StaticCatalog};
pub use config::CartConfig;
pub use error::{CartError, CatalogError, ConfigError, SnapshotError, StorageError, VibrationError};
pub use haptics::{
    Feedback, HapticFeedback, HapticPattern, HapticStatus, NoFeedback, NoVibrator, Vibrator,
};
pub use presenter::{Presenter, Toast};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{CartStore, LoadOutcome};
pub use view::{CartItemView, CartView};
