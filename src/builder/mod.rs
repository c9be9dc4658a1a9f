//! Builder API for assembling a controller from its collaborators.
//!
//! A display sink and a scheduler are required. The delay source defaults to
//! `RandomDelay`, the clock to `SystemClock` and the config to
//! `GameConfig::default()`.
//!
//! When driving the machine with a `ManualScheduler`, pass the same scheduler
//! as the clock so measured reaction times follow virtual time.

pub mod error;

pub use error::BuildError;

use crate::config::GameConfig;
use crate::controller::ReactionController;
use crate::ports::{Clock, DelaySource, DisplaySink, RandomDelay, SystemClock};
use crate::scheduler::Scheduler;
use std::sync::Arc;

/// Builder for `ReactionController` with a fluent API.
#[derive(Default)]
pub struct ControllerBuilder {
    display: Option<Arc<dyn DisplaySink>>,
    delays: Option<Arc<dyn DelaySource>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    clock: Option<Arc<dyn Clock>>,
    config: GameConfig,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display sink (required).
    pub fn display<D: DisplaySink + 'static>(mut self, display: Arc<D>) -> Self {
        self.display = Some(display);
        self
    }

    /// Set the scheduler bridge (required).
    pub fn scheduler<S: Scheduler + 'static>(mut self, scheduler: Arc<S>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn delay_source<R: DelaySource + 'static>(mut self, delays: Arc<R>) -> Self {
        self.delays = Some(delays);
        self
    }

    pub fn clock<C: Clock + 'static>(mut self, clock: Arc<C>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the controller. It starts in `Idle`; call `initialize` to put
    /// the first message on the display.
    pub fn build(self) -> Result<ReactionController, BuildError> {
        let display = self.display.ok_or(BuildError::MissingDisplay)?;
        let scheduler = self.scheduler.ok_or(BuildError::MissingScheduler)?;
        self.config.validate()?;

        let delays = self
            .delays
            .unwrap_or_else(|| Arc::new(RandomDelay::new()) as Arc<dyn DelaySource>);
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        Ok(ReactionController::from_parts(
            display,
            delays,
            scheduler,
            clock,
            self.config,
        ))
    }
}
