//! Monotonic time source for reaction measurements.

use std::time::Instant;

/// Returns the current monotonic instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// `std::time::Instant::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Tokio's clock, which follows `tokio::time::pause` and `advance` in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}
