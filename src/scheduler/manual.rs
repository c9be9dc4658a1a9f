//! Virtual-time scheduler.

use super::{Callback, CallbackHandle, Scheduler};
use crate::ports::Clock;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};
use uuid::Uuid;

type Key = (Duration, u64);

struct Entry {
    id: Uuid,
    callback: Callback,
}

#[derive(Default)]
struct Queue {
    elapsed: Duration,
    next_seq: u64,
    entries: BTreeMap<Key, Entry>,
    index: HashMap<Uuid, Key>,
}

impl Queue {
    fn pop_due(&mut self, deadline: Duration) -> Option<Entry> {
        let due = self
            .entries
            .first_key_value()
            .is_some_and(|(&(at, _), _)| at <= deadline);
        if !due {
            return None;
        }
        let ((at, _), entry) = self.entries.pop_first()?;
        self.index.remove(&entry.id);
        self.elapsed = self.elapsed.max(at);
        Some(entry)
    }
}

/// Scheduler whose clock only moves through `advance` and `fire_next`.
///
/// Callbacks run on the caller's thread, in due order (ties in scheduling
/// order). The queue lock is released before each callback runs, so a
/// callback may schedule or cancel further work.
///
/// `ManualScheduler` is also a `Clock` reading the same virtual time, so
/// measured reaction times are exact.
///
/// # Example
///
/// ```rust
/// use reflex::scheduler::{ManualScheduler, Scheduler};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
/// scheduler.schedule(
///     Duration::from_secs(2),
///     Box::new(move || flag.store(true, Ordering::SeqCst)),
/// );
///
/// scheduler.advance(Duration::from_secs(1));
/// assert!(!fired.load(Ordering::SeqCst));
/// scheduler.advance(Duration::from_secs(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
pub struct ManualScheduler {
    origin: Instant,
    queue: Mutex<Queue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: Mutex::new(Queue::default()),
        }
    }

    /// Virtual time since creation.
    pub fn elapsed(&self) -> Duration {
        self.queue.lock().elapsed
    }

    /// Number of callbacks neither fired nor cancelled.
    pub fn pending_count(&self) -> usize {
        self.queue.lock().entries.len()
    }

    /// Time until the earliest pending callback is due.
    pub fn next_due_in(&self) -> Option<Duration> {
        let queue = self.queue.lock();
        queue
            .entries
            .first_key_value()
            .map(|(&(at, _), _)| at.saturating_sub(queue.elapsed))
    }

    /// Move virtual time forward by `by`, running every callback that falls
    /// due on the way. Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = self.queue.lock().elapsed + by;
        let mut fired = 0;
        loop {
            let next = self.queue.lock().pop_due(deadline);
            let Some(entry) = next else { break };
            (entry.callback)();
            fired += 1;
        }
        let mut queue = self.queue.lock();
        queue.elapsed = queue.elapsed.max(deadline);
        fired
    }

    /// Jump to the earliest pending callback and run it.
    ///
    /// Returns the virtual time that passed, or `None` if nothing was pending.
    pub fn fire_next(&self) -> Option<Duration> {
        let (entry, waited) = {
            let mut queue = self.queue.lock();
            let before = queue.elapsed;
            let deadline = queue.entries.first_key_value().map(|(&(at, _), _)| at)?;
            let entry = queue.pop_due(deadline)?;
            (entry, queue.elapsed - before)
        };
        (entry.callback)();
        Some(waited)
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: Callback) -> CallbackHandle {
        let id = Uuid::new_v4();
        let mut queue = self.queue.lock();
        let key = (queue.elapsed + delay, queue.next_seq);
        queue.next_seq += 1;
        queue.entries.insert(key, Entry { id, callback });
        queue.index.insert(id, key);
        CallbackHandle::new(id)
    }

    fn cancel(&self, handle: &CallbackHandle) {
        let mut queue = self.queue.lock();
        if let Some(key) = queue.index.remove(&handle.id()) {
            queue.entries.remove(&key);
        }
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}
