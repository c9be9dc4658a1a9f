//! Tunable game parameters.
//!
//! Defaults reproduce the classic machine: three rounds, waits of 2 to 4
//! whole seconds, a five-second average display and no inactivity timeout.
//!
//! # Example
//!
//! ```rust
//! use reflex::config::{DelayPolicy, GameConfig};
//!
//! let config = GameConfig::from_toml_str(
//!     r#"
//!     max_rounds = 5
//!     coin_timeout_secs = 10
//!     delay_policy = "trust"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.max_rounds, 5);
//! assert_eq!(config.min_delay_secs, 2);
//! assert_eq!(config.delay_policy, DelayPolicy::Trust);
//! ```

pub mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the controller does with a delay outside the requested range.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayPolicy {
    /// Use the value as given.
    Trust,
    /// Clamp into `[min_delay_secs, max_delay_secs - 1]` and log a warning.
    #[default]
    Clamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Rounds per game before the average is shown.
    pub max_rounds: u32,
    /// Inclusive lower bound of a random wait, in seconds.
    pub min_delay_secs: u32,
    /// Exclusive upper bound of a random wait, in seconds.
    pub max_delay_secs: u32,
    /// How long the average stays up before the machine resets.
    pub average_display_secs: u64,
    /// Return to idle if no press follows a coin within this many seconds.
    pub coin_timeout_secs: Option<u64>,
    pub delay_policy: DelayPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            min_delay_secs: 2,
            max_delay_secs: 5,
            average_display_secs: 5,
            coin_timeout_secs: None,
            delay_policy: DelayPolicy::Clamp,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.min_delay_secs >= self.max_delay_secs {
            return Err(ConfigError::EmptyDelayRange {
                min: self.min_delay_secs,
                max: self.max_delay_secs,
            });
        }
        Ok(())
    }

    pub fn average_display(&self) -> Duration {
        Duration::from_secs(self.average_display_secs)
    }

    pub fn coin_timeout(&self) -> Option<Duration> {
        self.coin_timeout_secs.map(Duration::from_secs)
    }

    /// Apply the delay policy to a raw value from the delay source.
    pub fn settle_delay(&self, raw: u32) -> u32 {
        let (min, max) = (self.min_delay_secs, self.max_delay_secs);
        match self.delay_policy {
            DelayPolicy::Trust => raw,
            DelayPolicy::Clamp if (min..max).contains(&raw) => raw,
            DelayPolicy::Clamp => {
                let clamped = raw.clamp(min, max.saturating_sub(1).max(min));
                tracing::warn!(raw, clamped, min, max, "delay source out of range");
                clamped
            }
        }
    }
}
