//! Scheduling and delivery of deferred transitions.
//!
//! At most one callback is pending at a time. Each armed callback carries a
//! fresh token; when it fires it takes the state lock and only proceeds if
//! the register still holds that token. Cancelling clears the token under the
//! same lock, so a callback that lost the race finds nothing to do.

use super::{Shared, PRESS_GO, WAIT};
use crate::core::state::{GameState, Pending};
use crate::core::{Deferred, Phase, Trigger};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

impl Shared {
    /// Schedule `deferred` to run after `delay` and record it as pending.
    ///
    /// # Panics
    ///
    /// If a callback is already pending. Phase gating rules this out; reaching
    /// it means a transition forgot to cancel.
    pub(super) fn arm(self: &Arc<Self>, state: &mut GameState, deferred: Deferred, delay: Duration) {
        if let Some(existing) = &state.pending {
            panic!(
                "cannot schedule {} while {} is still pending",
                deferred.name(),
                existing.deferred.name()
            );
        }

        let token = Uuid::new_v4();
        let weak = Arc::downgrade(self);
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.fire(token);
                }
            }),
        );
        tracing::trace!(deferred = deferred.name(), ?delay, "callback armed");
        state.pending = Some(Pending {
            token,
            handle,
            deferred,
        });
    }

    /// Cancel the pending callback, if any. Safe to call repeatedly.
    pub(super) fn cancel_pending(&self, state: &mut GameState) {
        if let Some(pending) = state.pending.take() {
            tracing::trace!(deferred = pending.deferred.name(), "callback cancelled");
            self.scheduler.cancel(&pending.handle);
        }
    }

    /// Draw a wait length from the delay source.
    pub(super) fn draw_delay(&self) -> Duration {
        let raw = self
            .delays
            .get_random(self.config.min_delay_secs, self.config.max_delay_secs);
        Duration::from_secs(u64::from(self.config.settle_delay(raw)))
    }

    /// Start timing a round and arm its reaction wait.
    pub(super) fn begin_round(self: &Arc<Self>, state: &mut GameState) {
        state.round_started = Some(self.clock.now());
        let delay = self.draw_delay();
        self.arm(state, Deferred::ReactionWait, delay);
    }

    /// Close the round on display and move to the pause or the average.
    pub(super) fn finish_round(self: &Arc<Self>, state: &mut GameState) {
        state.rounds_played += 1;
        if state.rounds_played >= self.config.max_rounds {
            let average = state.average_secs();
            state.transition(Phase::DisplayingAverage, Trigger::Press);
            tracing::info!(rounds = state.rounds_played, average, "game complete");
            self.show(&format!("Average = {average:.2}"));
            self.arm(state, Deferred::AverageDisplay, self.config.average_display());
        } else {
            state.transition(Phase::WaitingForNextGame, Trigger::Press);
            self.show(WAIT);
            let delay = self.draw_delay();
            self.arm(state, Deferred::NextRound, delay);
        }
    }

    /// Entry point for every scheduled callback.
    fn fire(self: &Arc<Self>, token: Uuid) {
        let mut state = self.state.lock();
        let Some(pending) = state.take_pending_if(token) else {
            tracing::trace!("superseded callback discarded");
            return;
        };

        let trigger = Trigger::Timer(pending.deferred);
        match pending.deferred {
            Deferred::ReactionWait => {
                debug_assert_eq!(state.phase, Phase::WaitingForStart);
                let elapsed = state
                    .round_started
                    .take()
                    .map(|started| self.clock.now().saturating_duration_since(started))
                    .unwrap_or_default();
                state.reaction_times.push(elapsed);
                state.transition(Phase::DisplayingReactionTime, trigger);
                let secs = elapsed.as_secs_f64();
                tracing::info!(round = state.reaction_times.len(), secs, "reaction time recorded");
                self.show(&format!("{secs:.2}"));
            }
            Deferred::NextRound => {
                debug_assert_eq!(state.phase, Phase::WaitingForNextGame);
                state.transition(Phase::WaitingForStart, trigger);
                self.show(PRESS_GO);
                self.begin_round(&mut state);
            }
            Deferred::AverageDisplay | Deferred::CoinTimeout => {
                self.return_to_idle(&mut state, trigger);
            }
        }
    }
}
