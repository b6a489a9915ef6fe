//! Error types for the cart store and its ports.
//!
//! Every failure here is recoverable: the store logs it and keeps the
//! in-memory cart authoritative. Callers get these values back only so they
//! can react if they want to; nothing in this crate panics on them.

use nepali_shop_core::{CartStateError, ProductId};
use thiserror::Error;

/// Errors from a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// The backend refused the operation (quota, private mode, disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from decoding a persisted cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not a JSON array of line item records.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A record parsed but violates a line item invariant.
    #[error("invalid record at index {index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the persisted array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The records break a cart invariant, such as two sharing a product ID.
    #[error(transparent)]
    InvalidCart(#[from] CartStateError),
}

/// Errors from loading a product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file is not valid YAML for a product list.
    #[error("malformed catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Two products share an ID.
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),

    /// A product has a negative price.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// Errors from a vibration device.
#[derive(Debug, Error)]
pub enum VibrationError {
    /// The device has no vibration capability.
    #[error("vibration is not supported on this device")]
    Unsupported,

    /// The device reported a failure.
    #[error("vibration failed: {0}")]
    Device(String),
}

/// Errors from loading or validating [`crate::CartConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file is not valid YAML.
    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field has an unusable value.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Cart store operation error.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product is not in the catalog (on add) or not in the cart (on update).
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// The requested quantity is zero or could not be read as an integer.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Persisting or reading the snapshot failed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StorageError),

    /// The persisted snapshot could not be decoded.
    #[error(transparent)]
    MalformedSnapshot(#[from] SnapshotError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
