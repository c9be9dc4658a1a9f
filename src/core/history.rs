//! Phase transition history.
//!
//! Records every phase change of the current game session so callers and
//! tests can see how the machine got where it is.

use super::phase::Phase;
use super::state::Deferred;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What caused a phase change.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Trigger {
    /// `initialize` was called.
    Initialize,
    /// A coin was inserted.
    Coin,
    /// The go/stop button was pressed.
    Press,
    /// A scheduled callback fired.
    Timer(Deferred),
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialize => f.write_str("initialize"),
            Self::Coin => f.write_str("coin"),
            Self::Press => f.write_str("press"),
            Self::Timer(deferred) => write!(f, "timer:{}", deferred.name()),
        }
    }
}

/// Record of a single phase change.
///
/// # Example
///
/// ```rust
/// use reflex::core::{Phase, PhaseTransition, Trigger};
/// use chrono::Utc;
///
/// let transition = PhaseTransition {
///     from: Phase::Idle,
///     to: Phase::CoinInserted,
///     trigger: Trigger::Coin,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.trigger, Trigger::Coin);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// The phase being left
    pub from: Phase,
    /// The phase being entered
    pub to: Phase,
    /// What caused the change
    pub trigger: Trigger,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of phase changes since the last `initialize`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseHistory {
    transitions: Vec<PhaseTransition>,
}

impl PhaseHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition.
    pub fn record(&mut self, transition: PhaseTransition) {
        self.transitions.push(transition);
    }

    /// Drop every recorded transition.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Phases visited, starting with the first `from` phase.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reflex::core::{Phase, PhaseHistory, PhaseTransition, Trigger};
    /// use chrono::Utc;
    ///
    /// let mut history = PhaseHistory::new();
    /// history.record(PhaseTransition {
    ///     from: Phase::Idle,
    ///     to: Phase::CoinInserted,
    ///     trigger: Trigger::Coin,
    ///     timestamp: Utc::now(),
    /// });
    /// history.record(PhaseTransition {
    ///     from: Phase::CoinInserted,
    ///     to: Phase::WaitingForStart,
    ///     trigger: Trigger::Press,
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(
    ///     history.get_path(),
    ///     vec![Phase::Idle, Phase::CoinInserted, Phase::WaitingForStart]
    /// );
    /// ```
    pub fn get_path(&self) -> Vec<Phase> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Wall-clock span between the first and last transition.
    ///
    /// Returns `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// All recorded transitions in order.
    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: Phase, to: Phase, trigger: Trigger) -> PhaseTransition {
        PhaseTransition {
            from,
            to,
            trigger,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = PhaseHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn get_path_follows_transitions() {
        let mut history = PhaseHistory::new();
        history.record(transition(Phase::Idle, Phase::CoinInserted, Trigger::Coin));
        history.record(transition(
            Phase::CoinInserted,
            Phase::WaitingForStart,
            Trigger::Press,
        ));
        history.record(transition(
            Phase::WaitingForStart,
            Phase::DisplayingReactionTime,
            Trigger::Timer(Deferred::ReactionWait),
        ));

        assert_eq!(
            history.get_path(),
            vec![
                Phase::Idle,
                Phase::CoinInserted,
                Phase::WaitingForStart,
                Phase::DisplayingReactionTime
            ]
        );
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut history = PhaseHistory::new();
        let start = Utc::now();
        history.record(PhaseTransition {
            from: Phase::Idle,
            to: Phase::CoinInserted,
            trigger: Trigger::Coin,
            timestamp: start,
        });
        history.record(PhaseTransition {
            from: Phase::CoinInserted,
            to: Phase::WaitingForStart,
            trigger: Trigger::Press,
            timestamp: start + chrono::Duration::milliseconds(250),
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn clear_empties_history() {
        let mut history = PhaseHistory::new();
        history.record(transition(Phase::Idle, Phase::CoinInserted, Trigger::Coin));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn trigger_display_names_timer_kind() {
        assert_eq!(Trigger::Press.to_string(), "press");
        assert_eq!(
            Trigger::Timer(Deferred::AverageDisplay).to_string(),
            "timer:AverageDisplay"
        );
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = PhaseHistory::new();
        history.record(transition(Phase::Idle, Phase::CoinInserted, Trigger::Coin));

        let json = serde_json::to_string(&history).unwrap();
        let back: PhaseHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
