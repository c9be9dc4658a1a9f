//! The reaction game controller.
//!
//! `ReactionController` is the only thing that mutates the game register.
//! User actions and scheduler callbacks both take the same lock before
//! touching it, so a press and a timer firing are applied one after the
//! other, never interleaved.

mod timers;

use crate::builder::ControllerBuilder;
use crate::config::GameConfig;
use crate::core::state::GameState;
use crate::core::{Deferred, Phase, PhaseHistory, Trigger};
use crate::ports::{Clock, DelaySource, DisplaySink};
use crate::scheduler::Scheduler;
use crate::snapshot::GameSnapshot;
use parking_lot::Mutex;
use std::sync::Arc;

pub(crate) const INSERT_COIN: &str = "Insert coin";
pub(crate) const PRESS_GO: &str = "Press Go";
pub(crate) const WAIT: &str = "Wait...";

pub(crate) struct Shared {
    state: Mutex<GameState>,
    display: Arc<dyn DisplaySink>,
    delays: Arc<dyn DelaySource>,
    scheduler: Arc<dyn Scheduler>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(pending) = self.state.get_mut().pending.take() {
            self.scheduler.cancel(&pending.handle);
        }
    }
}

/// Controller for one reaction-time machine.
///
/// Cloning is cheap and every clone drives the same machine.
///
/// # Example
///
/// ```rust
/// use reflex::core::Phase;
/// use reflex::ports::{FixedDelay, RecordingDisplay};
/// use reflex::scheduler::ManualScheduler;
/// use reflex::ReactionController;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let display = Arc::new(RecordingDisplay::new());
/// let scheduler = Arc::new(ManualScheduler::new());
/// let controller = ReactionController::builder()
///     .display(display.clone())
///     .scheduler(scheduler.clone())
///     .clock(scheduler.clone())
///     .delay_source(Arc::new(FixedDelay(3)))
///     .build()
///     .unwrap();
///
/// controller.initialize();
/// controller.coin_inserted();
/// controller.go_stop_pressed();
/// assert_eq!(controller.phase(), Phase::WaitingForStart);
///
/// scheduler.advance(Duration::from_secs(3));
/// assert_eq!(controller.phase(), Phase::DisplayingReactionTime);
/// assert_eq!(display.current().as_deref(), Some("3.00"));
/// ```
#[derive(Clone)]
pub struct ReactionController {
    shared: Arc<Shared>,
}

impl ReactionController {
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }

    pub(crate) fn from_parts(
        display: Arc<dyn DisplaySink>,
        delays: Arc<dyn DelaySource>,
        scheduler: Arc<dyn Scheduler>,
        clock: Arc<dyn Clock>,
        config: GameConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(GameState::new()),
                display,
                delays,
                scheduler,
                clock,
                config,
            }),
        }
    }

    /// Reset to `Idle`, cancelling whatever was scheduled.
    ///
    /// Valid in any phase; used both at startup and as a hard reset.
    pub fn initialize(&self) {
        let shared = &self.shared;
        let mut state = shared.state.lock();
        shared.cancel_pending(&mut state);
        state.start_game();
        state.history.clear();
        state.transition(Phase::Idle, Trigger::Initialize);
        shared.show(INSERT_COIN);
    }

    /// Accept a coin. Ignored unless the machine is `Idle`.
    pub fn coin_inserted(&self) {
        let shared = &self.shared;
        let mut state = shared.state.lock();
        if state.phase != Phase::Idle {
            tracing::trace!(phase = %state.phase, "coin ignored");
            return;
        }
        state.start_game();
        state.transition(Phase::CoinInserted, Trigger::Coin);
        shared.show(PRESS_GO);
        if let Some(timeout) = shared.config.coin_timeout() {
            shared.arm(&mut state, Deferred::CoinTimeout, timeout);
        }
    }

    /// Handle the go/stop button.
    ///
    /// | phase | effect |
    /// |---|---|
    /// | `Idle` | none |
    /// | `CoinInserted` | start the reaction wait |
    /// | `WaitingForStart`, `WaitingForNextGame`, `DisplayingAverage` | abort to `Idle` |
    /// | `DisplayingReactionTime` | finish the round; next round or average |
    pub fn go_stop_pressed(&self) {
        let shared = &self.shared;
        let mut state = shared.state.lock();
        match state.phase {
            Phase::Idle => tracing::trace!("press ignored while idle"),
            Phase::CoinInserted => {
                shared.cancel_pending(&mut state);
                state.transition(Phase::WaitingForStart, Trigger::Press);
                shared.begin_round(&mut state);
            }
            Phase::WaitingForStart | Phase::WaitingForNextGame | Phase::DisplayingAverage => {
                shared.cancel_pending(&mut state);
                shared.return_to_idle(&mut state, Trigger::Press);
            }
            Phase::DisplayingReactionTime => shared.finish_round(&mut state),
        }
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.lock().phase
    }

    /// Consistent view of the whole register.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.shared.state.lock())
    }

    /// Phase changes since the last `initialize`.
    pub fn history(&self) -> PhaseHistory {
        self.shared.state.lock().history.clone()
    }

    pub fn config(&self) -> &GameConfig {
        &self.shared.config
    }
}

impl Shared {
    fn show(&self, text: &str) {
        self.display.set_display(text);
    }

    fn return_to_idle(&self, state: &mut GameState, trigger: Trigger) {
        state.end_game();
        state.transition(Phase::Idle, trigger);
        self.show(INSERT_COIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedDelay, RecordingDisplay};
    use crate::scheduler::ManualScheduler;
    use std::time::Duration;

    struct Rig {
        controller: ReactionController,
        display: Arc<RecordingDisplay>,
        scheduler: Arc<ManualScheduler>,
    }

    fn rig(config: GameConfig) -> Rig {
        let display = Arc::new(RecordingDisplay::new());
        let scheduler = Arc::new(ManualScheduler::new());
        let controller = ReactionController::from_parts(
            display.clone(),
            Arc::new(FixedDelay(3)),
            scheduler.clone(),
            scheduler.clone(),
            config,
        );
        controller.initialize();
        Rig {
            controller,
            display,
            scheduler,
        }
    }

    fn shown(rig: &Rig) -> String {
        rig.display.current().unwrap_or_default()
    }

    #[test]
    fn initialize_shows_insert_coin() {
        let rig = rig(GameConfig::default());
        let snapshot = rig.controller.snapshot();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.rounds_played, 0);
        assert!(snapshot.reaction_times.is_empty());
        assert_eq!(snapshot.pending, None);
        assert_eq!(shown(&rig), INSERT_COIN);
    }

    #[test]
    fn coin_moves_to_coin_inserted() {
        let rig = rig(GameConfig::default());
        rig.controller.coin_inserted();
        assert_eq!(rig.controller.phase(), Phase::CoinInserted);
        assert_eq!(shown(&rig), PRESS_GO);
        assert_eq!(rig.scheduler.pending_count(), 0);
    }

    #[test]
    fn first_press_starts_wait_without_changing_display() {
        let rig = rig(GameConfig::default());
        rig.controller.coin_inserted();
        rig.controller.go_stop_pressed();

        assert_eq!(rig.controller.phase(), Phase::WaitingForStart);
        assert_eq!(shown(&rig), PRESS_GO);
        assert_eq!(rig.controller.snapshot().pending, Some(Deferred::ReactionWait));
        assert_eq!(rig.scheduler.next_due_in(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn press_in_idle_is_noop() {
        let rig = rig(GameConfig::default());
        let before = rig.display.len();
        rig.controller.go_stop_pressed();
        assert_eq!(rig.controller.phase(), Phase::Idle);
        assert_eq!(rig.display.len(), before);
    }

    #[test]
    fn initialize_cancels_pending_wait() {
        let rig = rig(GameConfig::default());
        rig.controller.coin_inserted();
        rig.controller.go_stop_pressed();
        rig.controller.initialize();

        assert_eq!(rig.scheduler.pending_count(), 0);
        rig.scheduler.advance(Duration::from_secs(10));
        assert_eq!(rig.controller.phase(), Phase::Idle);
        assert_eq!(shown(&rig), INSERT_COIN);
    }

    #[test]
    fn coin_timeout_returns_to_idle() {
        let rig = rig(GameConfig {
            coin_timeout_secs: Some(10),
            ..GameConfig::default()
        });
        rig.controller.coin_inserted();
        assert_eq!(rig.controller.snapshot().pending, Some(Deferred::CoinTimeout));

        rig.scheduler.advance(Duration::from_secs(9));
        assert_eq!(rig.controller.phase(), Phase::CoinInserted);
        rig.scheduler.advance(Duration::from_secs(1));
        assert_eq!(rig.controller.phase(), Phase::Idle);
        assert_eq!(shown(&rig), INSERT_COIN);
    }

    #[test]
    fn press_replaces_coin_timeout_with_reaction_wait() {
        let rig = rig(GameConfig {
            coin_timeout_secs: Some(10),
            ..GameConfig::default()
        });
        rig.controller.coin_inserted();
        rig.controller.go_stop_pressed();

        assert_eq!(rig.scheduler.pending_count(), 1);
        assert_eq!(rig.controller.snapshot().pending, Some(Deferred::ReactionWait));
        rig.scheduler.advance(Duration::from_secs(20));
        assert_eq!(rig.controller.phase(), Phase::DisplayingReactionTime);
    }

    #[test]
    fn dropping_controller_cancels_pending_callback() {
        let rig = rig(GameConfig::default());
        rig.controller.coin_inserted();
        rig.controller.go_stop_pressed();
        let scheduler = rig.scheduler.clone();
        drop(rig.controller);

        assert_eq!(scheduler.pending_count(), 0);
    }
}
