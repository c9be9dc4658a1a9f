//! The game's state register.
//!
//! `GameState` is owned by the controller and only mutated while its lock is
//! held. It is created once and reset, never recreated.

use super::history::{PhaseHistory, PhaseTransition, Trigger};
use super::phase::Phase;
use crate::scheduler::CallbackHandle;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Kind of deferred transition a scheduled callback performs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Deferred {
    /// Ends the reaction wait and records the elapsed time.
    ReactionWait,
    /// Ends the pause between rounds.
    NextRound,
    /// Ends the average display window.
    AverageDisplay,
    /// Ends an unattended `CoinInserted` phase.
    CoinTimeout,
}

impl Deferred {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReactionWait => "ReactionWait",
            Self::NextRound => "NextRound",
            Self::AverageDisplay => "AverageDisplay",
            Self::CoinTimeout => "CoinTimeout",
        }
    }
}

/// The single outstanding scheduled callback.
///
/// `token` is captured by the callback closure; a firing callback only acts
/// if its token still matches the one stored here.
#[derive(Debug)]
pub(crate) struct Pending {
    pub(crate) token: Uuid,
    pub(crate) handle: CallbackHandle,
    pub(crate) deferred: Deferred,
}

#[derive(Debug, Default)]
pub(crate) struct GameState {
    pub(crate) phase: Phase,
    pub(crate) rounds_played: u32,
    pub(crate) reaction_times: Vec<Duration>,
    pub(crate) round_started: Option<Instant>,
    pub(crate) pending: Option<Pending>,
    pub(crate) history: PhaseHistory,
}

impl GameState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Move to `to`, recording the change.
    pub(crate) fn transition(&mut self, to: Phase, trigger: Trigger) {
        let from = self.phase;
        tracing::debug!(%from, %to, %trigger, "phase transition");
        self.history.record(PhaseTransition {
            from,
            to,
            trigger,
            timestamp: Utc::now(),
        });
        self.phase = to;
    }

    /// Remove the pending callback if it is the one identified by `token`.
    pub(crate) fn take_pending_if(&mut self, token: Uuid) -> Option<Pending> {
        self.pending.take_if(|pending| pending.token == token)
    }

    /// Clear per-game data ahead of a fresh game.
    pub(crate) fn start_game(&mut self) {
        self.rounds_played = 0;
        self.reaction_times.clear();
        self.round_started = None;
    }

    /// Per-round bookkeeping on a return to `Idle`.
    ///
    /// Reaction times survive until the next coin so the last game can still
    /// be inspected.
    pub(crate) fn end_game(&mut self) {
        self.rounds_played = 0;
        self.round_started = None;
    }

    /// Mean reaction time in seconds; `0.0` when nothing was recorded.
    pub(crate) fn average_secs(&self) -> f64 {
        average_secs(&self.reaction_times)
    }
}

pub(crate) fn average_secs(times: &[Duration]) -> f64 {
    if times.is_empty() {
        return 0.0;
    }
    let total: f64 = times.iter().map(Duration::as_secs_f64).sum();
    total / times.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_and_empty() {
        let state = GameState::new();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.rounds_played, 0);
        assert!(state.reaction_times.is_empty());
        assert!(state.pending.is_none());
        assert!(state.history.is_empty());
    }

    #[test]
    fn transition_records_history() {
        let mut state = GameState::new();
        state.transition(Phase::CoinInserted, Trigger::Coin);
        state.transition(Phase::WaitingForStart, Trigger::Press);

        assert_eq!(state.phase, Phase::WaitingForStart);
        assert_eq!(
            state.history.get_path(),
            vec![Phase::Idle, Phase::CoinInserted, Phase::WaitingForStart]
        );
    }

    #[test]
    fn take_pending_if_requires_matching_token() {
        let mut state = GameState::new();
        let token = Uuid::new_v4();
        state.pending = Some(Pending {
            token,
            handle: CallbackHandle::new(Uuid::new_v4()),
            deferred: Deferred::ReactionWait,
        });

        assert!(state.take_pending_if(Uuid::new_v4()).is_none());
        assert!(state.pending.is_some());

        let taken = state.take_pending_if(token).unwrap();
        assert_eq!(taken.deferred, Deferred::ReactionWait);
        assert!(state.pending.is_none());
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_secs(&[]), 0.0);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        let times = [
            Duration::from_millis(2_000),
            Duration::from_millis(3_000),
            Duration::from_millis(4_500),
        ];
        assert!((average_secs(&times) - 3.1666).abs() < 1e-3);
    }

    #[test]
    fn end_game_keeps_reaction_times() {
        let mut state = GameState::new();
        state.rounds_played = 2;
        state.reaction_times.push(Duration::from_secs(3));
        state.end_game();
        assert_eq!(state.rounds_played, 0);
        assert_eq!(state.reaction_times.len(), 1);

        state.start_game();
        assert!(state.reaction_times.is_empty());
    }
}
