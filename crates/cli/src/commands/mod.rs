//! Command implementations.
//!
//! Each command opens a fresh session: storage directory, catalog and config
//! are loaded, the cart is hydrated, one operation runs, and the terminal
//! presenter writes the result.

use std::fs;
use std::path::{Path, PathBuf};

use nepali_shop_cart::{
    CartConfig, CartError, CartStore, CatalogError, ConfigError, FileStorage, HapticFeedback,
    StaticCatalog, StorageError,
};
use thiserror::Error;

use crate::terminal::BellVibrator;

pub mod cart;
pub mod haptics;
pub mod products;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading an input file failed.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing to the terminal failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// The storage directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The catalog file is invalid.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The config file is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The cart rejected the operation.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// The haptics preference could not be written.
    #[error("Failed to save haptics preference")]
    PreferenceNotSaved,

    /// Unknown category filter.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Where a session finds its inputs.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub data_dir: PathBuf,
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub type Haptics = HapticFeedback<BellVibrator, FileStorage>;
pub type Store = CartStore<FileStorage, StaticCatalog, Haptics>;

impl SessionOptions {
    pub fn load_config(&self) -> Result<CartConfig, CommandError> {
        match &self.config {
            Some(path) => Ok(CartConfig::from_yaml(&read(path)?)?),
            None => Ok(CartConfig::default()),
        }
    }

    pub fn load_catalog(&self) -> Result<StaticCatalog, CommandError> {
        match &self.catalog {
            Some(path) => Ok(StaticCatalog::from_yaml(&read(path)?)?),
            None => Ok(StaticCatalog::nepali_crafts()),
        }
    }

    pub fn open_storage(&self) -> Result<FileStorage, CommandError> {
        Ok(FileStorage::open(&self.data_dir)?)
    }

    pub fn open_haptics(&self, config: &CartConfig) -> Result<Haptics, CommandError> {
        Ok(HapticFeedback::new(
            BellVibrator,
            self.open_storage()?,
            config.haptics_key.clone(),
        ))
    }

    /// Open and hydrate the cart store.
    pub fn open_store(&self) -> Result<Store, CommandError> {
        let config = self.load_config()?;
        let storage = self.open_storage()?;
        let catalog = self.load_catalog()?;
        let haptics = self.open_haptics(&config)?;
        Ok(CartStore::open(config, storage, catalog, haptics))
    }
}

fn read(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}
