//! Delay source: random wait lengths for the reaction game.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Provides a bounded integer used as a wait duration in seconds.
///
/// Implementations should return a value in `[low, high)`. The controller
/// applies its configured `DelayPolicy` to anything outside that range.
pub trait DelaySource: Send + Sync {
    fn get_random(&self, low: u32, high: u32) -> u32;
}

/// Uniform random delays from a `StdRng`.
#[derive(Debug)]
pub struct RandomDelay {
    rng: Mutex<StdRng>,
}

impl RandomDelay {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelaySource for RandomDelay {
    fn get_random(&self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.lock().random_range(low..high)
    }
}

/// Always returns the same value, whatever range is asked for.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub u32);

impl DelaySource for FixedDelay {
    fn get_random(&self, _low: u32, _high: u32) -> u32 {
        self.0
    }
}

/// Replays a fixed script of values, wrapping around at the end.
#[derive(Debug)]
pub struct ScriptedDelay {
    values: Vec<u32>,
    cursor: Mutex<usize>,
}

impl ScriptedDelay {
    /// An empty script behaves like `FixedDelay` at the low bound.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: Mutex::new(0),
        }
    }
}

impl DelaySource for ScriptedDelay {
    fn get_random(&self, low: u32, _high: u32) -> u32 {
        if self.values.is_empty() {
            return low;
        }
        let mut cursor = self.cursor.lock();
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        value
    }
}
