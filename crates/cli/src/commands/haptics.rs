//! Haptic feedback preference.

use std::io::{self, Write};

use nepali_shop_cart::HapticPattern;

use super::{CommandError, SessionOptions};

/// Turn haptic feedback on or off, confirming with a pulse when enabled.
pub fn set(options: &SessionOptions, enabled: bool) -> Result<(), CommandError> {
    let config = options.load_config()?;
    let mut haptics = options.open_haptics(&config)?;

    if !haptics.set_enabled(enabled) {
        return Err(CommandError::PreferenceNotSaved);
    }
    if enabled {
        haptics.pulse(HapticPattern::Confirm);
    }

    let mut out = io::stdout().lock();
    writeln!(out, "{}", haptics.status().message())?;
    Ok(())
}

/// Print whether haptic feedback is available and enabled.
pub fn status(options: &SessionOptions) -> Result<(), CommandError> {
    let config = options.load_config()?;
    let haptics = options.open_haptics(&config)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{}", haptics.status().message())?;
    Ok(())
}
