//! Haptic feedback over a device vibration capability.
//!
//! [`HapticFeedback`] plays a fixed set of named vibration patterns on a
//! [`Vibrator`], honouring a persisted on/off preference. It never fails
//! loudly: every problem (no device support, preference off, device error)
//! turns into a `false` return and a log line.

use core::fmt;
use core::str::FromStr;

use tracing::{debug, warn};

use crate::error::VibrationError;
use crate::storage::KeyValueStore;

/// Named vibration patterns, tuned for mobile commerce interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticPattern {
    /// Short pulse for neutral actions.
    AddToCart,
    /// Double pulse for removal.
    RemoveFromCart,
    Success,
    /// Triple short pulse.
    Error,
    /// Single long pulse.
    Notification,
    Confirm,
}

impl HapticPattern {
    /// All patterns.
    pub const ALL: [Self; 6] = [
        Self::AddToCart,
        Self::RemoveFromCart,
        Self::Success,
        Self::Error,
        Self::Notification,
        Self::Confirm,
    ];

    /// Alternating vibrate/pause durations in milliseconds.
    #[must_use]
    pub const fn durations(&self) -> &'static [u32] {
        match self {
            Self::AddToCart => &[100],
            Self::RemoveFromCart => &[30, 20, 30],
            Self::Success => &[100, 50, 100],
            Self::Error => &[30, 20, 30, 20, 30],
            Self::Notification => &[200],
            Self::Confirm => &[150],
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddToCart => "addToCart",
            Self::RemoveFromCart => "removeFromCart",
            Self::Success => "success",
            Self::Error => "error",
            Self::Notification => "notification",
            Self::Confirm => "confirm",
        }
    }
}

impl fmt::Display for HapticPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown pattern name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown haptic pattern: {0}")]
pub struct UnknownPattern(pub String);

impl FromStr for HapticPattern {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name() == s)
            .ok_or_else(|| UnknownPattern(s.to_string()))
    }
}

/// A device that can vibrate.
pub trait Vibrator {
    /// Whether the device has a vibration capability at all.
    fn is_supported(&self) -> bool;

    /// Play alternating vibrate/pause durations in milliseconds.
    /// `[0]` cancels any vibration in progress.
    ///
    /// # Errors
    ///
    /// Returns `VibrationError` if the device rejects the request.
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), VibrationError>;
}

/// A device without vibration support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVibrator;

impl Vibrator for NoVibrator {
    fn is_supported(&self) -> bool {
        false
    }

    fn vibrate(&mut self, _pattern: &[u32]) -> Result<(), VibrationError> {
        Err(VibrationError::Unsupported)
    }
}

/// Best-effort feedback port used by the cart store.
pub trait Feedback {
    /// Request a feedback pulse. Returns whether it was played.
    fn pulse(&mut self, pattern: HapticPattern) -> bool;
}

/// Feedback sink that never plays anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn pulse(&mut self, _pattern: HapticPattern) -> bool {
        false
    }
}

/// Haptics availability as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStatus {
    Unsupported,
    Disabled,
    Enabled,
}

impl HapticStatus {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Unsupported => "Haptic feedback not supported on this device",
            Self::Disabled => "Haptic feedback is disabled",
            Self::Enabled => "Haptic feedback is enabled",
        }
    }
}

/// Vibration patterns gated by device support and a persisted preference.
#[derive(Debug)]
pub struct HapticFeedback<V, S> {
    vibrator: V,
    storage: S,
    preference_key: String,
}

impl<V: Vibrator, S: KeyValueStore> HapticFeedback<V, S> {
    pub fn new(vibrator: V, storage: S, preference_key: impl Into<String>) -> Self {
        Self {
            vibrator,
            storage,
            preference_key: preference_key.into(),
        }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.vibrator.is_supported()
    }

    /// Whether the user has haptics switched on.
    ///
    /// A missing preference means enabled. An unreadable store is treated the
    /// same way, since the default applies whenever nothing was saved.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self.storage.get(&self.preference_key) {
            Ok(None) => true,
            Ok(Some(value)) => value == "true",
            Err(e) => {
                warn!(error = %e, "Failed to read haptics preference, using default");
                true
            }
        }
    }

    /// Persist the user's preference. Returns whether it was saved.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        let value = if enabled { "true" } else { "false" };
        match self.storage.set(&self.preference_key, value) {
            Ok(()) => {
                debug!(enabled, "Haptics preference saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to save haptics preference");
                false
            }
        }
    }

    /// Play a pattern. Returns `false` if unsupported, disabled or failed.
    pub fn pulse(&mut self, pattern: HapticPattern) -> bool {
        if !self.vibrator.is_supported() {
            debug!(%pattern, "Vibration not supported on this device");
            return false;
        }
        if !self.is_enabled() {
            debug!(%pattern, "Haptics disabled by user preference");
            return false;
        }

        match self.vibrator.vibrate(pattern.durations()) {
            Ok(()) => {
                debug!(%pattern, "Vibration triggered");
                true
            }
            Err(e) => {
                warn!(%pattern, error = %e, "Vibration failed");
                false
            }
        }
    }

    /// Play a pattern by name, as received from markup or configuration.
    pub fn pulse_named(&mut self, name: &str) -> bool {
        match name.parse::<HapticPattern>() {
            Ok(pattern) => self.pulse(pattern),
            Err(e) => {
                warn!(error = %e, "Ignoring haptic request");
                false
            }
        }
    }

    /// Cancel any vibration in progress.
    pub fn stop(&mut self) {
        if self.vibrator.is_supported()
            && let Err(e) = self.vibrator.vibrate(&[0])
        {
            warn!(error = %e, "Failed to stop vibration");
        }
    }

    #[must_use]
    pub fn status(&self) -> HapticStatus {
        if !self.is_supported() {
            HapticStatus::Unsupported
        } else if self.is_enabled() {
            HapticStatus::Enabled
        } else {
            HapticStatus::Disabled
        }
    }

    /// The wrapped device.
    pub const fn vibrator(&self) -> &V {
        &self.vibrator
    }
}

impl<V: Vibrator, S: KeyValueStore> Feedback for HapticFeedback<V, S> {
    fn pulse(&mut self, pattern: HapticPattern) -> bool {
        Self::pulse(self, pattern)
    }
}
