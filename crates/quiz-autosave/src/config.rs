//! Auto-save configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Largest accepted debounce delay in milliseconds.
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Configuration for auto-save behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSaveConfig {
    /// Whether edits are saved in the background.
    ///
    /// When disabled, edits are only sent by an explicit finalize.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Debounce delay in milliseconds.
    ///
    /// After an edit, the saver waits this long before sending.
    /// Additional edits reset the timer.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl AutoSaveConfig {
    /// Create an enabled config with the given debounce delay.
    pub fn new(debounce_ms: u64) -> Result<Self, ConfigError> {
        let config = Self {
            enabled: true,
            debounce_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a config that never saves in the background.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Check that the debounce delay is within range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::DebounceTooLong {
                debounce_ms: self.debounce_ms,
                max_ms: MAX_DEBOUNCE_MS,
            });
        }
        Ok(())
    }

    /// The debounce delay as a [`Duration`].
    #[inline]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
