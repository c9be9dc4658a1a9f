//! Build errors for the controller builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a `ReactionController`.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Display sink not specified. Call .display(sink) before .build()")]
    MissingDisplay,

    #[error("Scheduler not specified. Call .scheduler(scheduler) before .build()")]
    MissingScheduler,

    #[error("Invalid game config: {0}")]
    InvalidConfig(#[from] ConfigError),
}
