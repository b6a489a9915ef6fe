//! Durable key-value storage port.
//!
//! The cart and the haptics preference each live under one string key, the
//! way a browser's local storage holds them. Receivers take `&self`: the
//! backing store is an ambient, shared object and several collaborators
//! (the cart store, the haptics wrapper) hold handles onto the same one.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map; clones share state
//! - [`FileStorage`] - one file per key under a directory
//!
//! There is no cross-handle coordination: when two sessions write the same
//! key, the last write wins.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Durable string key-value store.
pub trait KeyValueStore {
    /// Read the value for `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
