//! Tokio-backed scheduler.

use super::{Callback, CallbackHandle, Scheduler};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::AbortHandle;
use uuid::Uuid;

/// Runs each callback on its own task after `tokio::time::sleep`.
///
/// A task only runs its callback if it can still claim its entry in the
/// task table; `cancel` removes the entry, so a cancel that lands before the
/// claim always wins, even if the abort arrives late.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
    tasks: Arc<Mutex<HashMap<Uuid, AbortHandle>>>,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Scheduler on the runtime the caller is running in.
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    /// Number of callbacks that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: Callback) -> CallbackHandle {
        let id = Uuid::new_v4();
        let tasks = Arc::clone(&self.tasks);

        // Held across spawn so the task cannot claim its entry before it exists.
        let mut table = self.tasks.lock();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let claimed = tasks.lock().remove(&id).is_some();
            if claimed {
                callback();
            }
        });
        table.insert(id, task.abort_handle());
        CallbackHandle::new(id)
    }

    fn cancel(&self, handle: &CallbackHandle) {
        if let Some(task) = self.tasks.lock().remove(&handle.id()) {
            task.abort();
        }
    }
}
