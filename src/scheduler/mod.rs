//! Scheduler bridge: run a callback once after a delay, or cancel it first.
//!
//! Two implementations are provided:
//! - `TokioScheduler` spawns a sleeping task per callback on a tokio runtime
//! - `ManualScheduler` keeps a virtual clock that only moves when told to,
//!   for deterministic tests and simulations
//!
//! Schedulers do not enforce the one-pending-callback rule; the controller
//! does that through phase gating.

mod manual;
mod runtime;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

use std::time::Duration;
use uuid::Uuid;

/// A deferred unit of work.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one scheduled callback.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CallbackHandle(Uuid);

impl CallbackHandle {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

/// Runs callbacks after a delay on some independent execution context.
///
/// `schedule` returns immediately. `cancel` is idempotent: cancelling a
/// handle that already fired or was already cancelled does nothing. Once
/// `cancel` returns for a callback that had not started, it never runs.
///
/// Callbacks must not run on the caller's thread from inside `schedule`:
/// the controller schedules while holding its state lock.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, callback: Callback) -> CallbackHandle;

    fn cancel(&self, handle: &CallbackHandle);
}
