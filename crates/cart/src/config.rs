//! Cart store configuration.
//!
//! Every field has a default matching the shipped storefront, so
//! `CartConfig::default()` is a complete configuration. A YAML file may
//! override any subset of fields:
//!
//! ```yaml
//! storage_key: nepaliShopCart
//! haptics_key: hapticsEnabled
//! currency: GBP
//! toast_duration_ms: 3000
//! ```

use std::time::Duration;

use nepali_shop_core::CurrencyCode;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage key holding the persisted cart snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "nepaliShopCart";

/// Storage key holding the haptic feedback preference.
pub const DEFAULT_HAPTICS_KEY: &str = "hapticsEnabled";

const DEFAULT_TOAST_DURATION_MS: u64 = 3000;
const DEFAULT_CLEAR_PROMPT: &str = "Are you sure you want to clear your cart?";

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Namespace key the cart snapshot is stored under.
    pub storage_key: String,
    /// Key holding the persisted haptics on/off preference.
    pub haptics_key: String,
    /// Currency used when reporting totals.
    pub currency: CurrencyCode,
    /// How long a confirmation toast stays visible.
    pub toast_duration_ms: u64,
    /// Question shown to the user before clearing the cart.
    pub clear_prompt: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            haptics_key: DEFAULT_HAPTICS_KEY.to_string(),
            currency: CurrencyCode::default(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            clear_prompt: DEFAULT_CLEAR_PROMPT.to_string(),
        }
    }
}

impl CartConfig {
    /// Parse and validate configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML is malformed or a value fails
    /// [`CartConfig::validate`].
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a storage key is empty, both keys
    /// are the same, or the toast duration is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.haptics_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "haptics_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.storage_key == self.haptics_key {
            return Err(ConfigError::Invalid {
                field: "haptics_key",
                reason: format!("must differ from storage_key ({})", self.storage_key),
            });
        }
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "toast_duration_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Toast display duration.
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}
