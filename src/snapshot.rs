//! Read-only snapshots of the game register.
//!
//! A snapshot is taken under the controller's lock, so every field describes
//! the same instant. Snapshots are for inspection and reporting; the
//! controller never restores from one.

use crate::core::state::GameState;
use crate::core::{Deferred, Phase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub phase: Phase,

    /// Rounds completed in the current game
    pub rounds_played: u32,

    /// Recorded reaction times, in seconds, oldest first
    pub reaction_times: Vec<f64>,

    /// Kind of the outstanding scheduled callback, if any
    pub pending: Option<Deferred>,
}

impl GameSnapshot {
    pub(crate) fn capture(state: &GameState) -> Self {
        Self {
            taken_at: Utc::now(),
            phase: state.phase,
            rounds_played: state.rounds_played,
            reaction_times: state
                .reaction_times
                .iter()
                .map(|t| t.as_secs_f64())
                .collect(),
            pending: state.pending.as_ref().map(|p| p.deferred),
        }
    }

    /// Mean of the recorded reaction times; `0.0` when there are none.
    pub fn average_secs(&self) -> f64 {
        if self.reaction_times.is_empty() {
            return 0.0;
        }
        self.reaction_times.iter().sum::<f64>() / self.reaction_times.len() as f64
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
