//! Tunables for rank bands, raise steps, and close-rejection feedback.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First rank handed to a normal window; sits above the app bar layer.
pub const DEFAULT_BASE_RANK: u32 = 100;
pub const DEFAULT_SHAKE_DURATION_MS: u64 = 500;
pub const DEFAULT_ERROR_SOUND: &str = "error-beep";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackBands {
    pub system: u32,
    pub modal: u32,
    pub menu: u32,
}

impl Default for StackBands {
    fn default() -> Self {
        Self {
            system: 200,
            modal: 150,
            menu: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowManagerConfig {
    /// Seed for `next_rank` in a fresh registry.
    pub base_rank: u32,
    /// Amount `next_rank` advances per normal registration.
    pub normal_rank_step: u32,
    /// Gap between the current top rank and a freshly raised window.
    pub raise_step: u32,
    /// Amount `next_rank` advances per raise.
    pub raise_rank_advance: u32,
    pub bands: StackBands,
    pub shake_duration_ms: u64,
    pub audio_enabled: bool,
    pub error_sound: String,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            base_rank: DEFAULT_BASE_RANK,
            normal_rank_step: 10,
            raise_step: 10,
            raise_rank_advance: 20,
            bands: StackBands::default(),
            shake_duration_ms: DEFAULT_SHAKE_DURATION_MS,
            audio_enabled: false,
            error_sound: DEFAULT_ERROR_SOUND.to_string(),
        }
    }
}

#[derive(Debug, Error)]
/// Errors raised while loading a [`WindowManagerConfig`].
pub enum ConfigError {
    /// The payload was not valid JSON for the config shape.
    #[error("window manager config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// Tier bands must satisfy `system > modal > menu`.
    #[error("stack bands out of order: system={system} modal={modal} menu={menu}")]
    BandsOutOfOrder {
        /// System band.
        system: u32,
        /// Modal band.
        modal: u32,
        /// Menu band.
        menu: u32,
    },
    /// A rank step of zero would let two raises share a rank.
    #[error("rank step `{0}` must be non-zero")]
    ZeroStep(&'static str),
}

impl WindowManagerConfig {
    /// Parses and validates a JSON config payload. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the payload is malformed or fails validation.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks band ordering and step sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let StackBands {
            system,
            modal,
            menu,
        } = self.bands;
        if !(system > modal && modal > menu) {
            return Err(ConfigError::BandsOutOfOrder {
                system,
                modal,
                menu,
            });
        }
        if self.normal_rank_step == 0 {
            return Err(ConfigError::ZeroStep("normal_rank_step"));
        }
        if self.raise_step == 0 {
            return Err(ConfigError::ZeroStep("raise_step"));
        }
        Ok(())
    }

    pub fn shake_duration(&self) -> Duration {
        Duration::from_millis(self.shake_duration_ms)
    }
}
