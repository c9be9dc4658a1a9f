//! Configuration errors.

use thiserror::Error;

/// Errors that can occur when loading or validating a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse game config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_rounds must be at least 1")]
    NoRounds,

    #[error("Delay range [{min}, {max}) is empty")]
    EmptyDelayRange { min: u32, max: u32 },
}
