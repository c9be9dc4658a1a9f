//! Discrete phases of the reaction game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the game state machine.
///
/// Each phase gates which external actions are accepted and whether a
/// scheduled callback may be outstanding.
///
/// # Example
///
/// ```rust
/// use reflex::core::Phase;
///
/// assert_eq!(Phase::Idle.name(), "Idle");
/// assert!(Phase::WaitingForStart.holds_pending());
/// assert!(!Phase::DisplayingReactionTime.holds_pending());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No game in progress; waiting for a coin.
    #[default]
    Idle,
    /// Coin accepted; waiting for the first press.
    CoinInserted,
    /// Reaction wait is running.
    WaitingForStart,
    /// Last measured reaction time is on the display.
    DisplayingReactionTime,
    /// Pause between rounds.
    WaitingForNextGame,
    /// Average of the finished game is on the display.
    DisplayingAverage,
}

impl Phase {
    /// All phases in declaration order.
    pub const ALL: [Phase; 6] = [
        Phase::Idle,
        Phase::CoinInserted,
        Phase::WaitingForStart,
        Phase::DisplayingReactionTime,
        Phase::WaitingForNextGame,
        Phase::DisplayingAverage,
    ];

    /// Static name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::CoinInserted => "CoinInserted",
            Self::WaitingForStart => "WaitingForStart",
            Self::DisplayingReactionTime => "DisplayingReactionTime",
            Self::WaitingForNextGame => "WaitingForNextGame",
            Self::DisplayingAverage => "DisplayingAverage",
        }
    }

    /// Whether the machine always owns a scheduled callback in this phase.
    ///
    /// `CoinInserted` may also hold one when an inactivity timeout is
    /// configured, so it is not listed here.
    pub fn holds_pending(&self) -> bool {
        matches!(
            self,
            Self::WaitingForStart | Self::WaitingForNextGame | Self::DisplayingAverage
        )
    }

    /// Whether a press in this phase aborts the game.
    pub fn is_abortable(&self) -> bool {
        self.holds_pending()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
