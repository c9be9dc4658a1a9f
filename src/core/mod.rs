//! Core game types.
//!
//! This module contains the data the controller owns:
//! - `Phase`, the discrete position of the state machine
//! - the game state register and its deferred-transition kinds
//! - a timestamped history of phase changes
//!
//! Nothing here schedules, displays, or locks; the controller does that.

mod history;
mod phase;
pub(crate) mod state;

pub use history::{PhaseHistory, PhaseTransition, Trigger};
pub use phase::Phase;
pub use state::Deferred;
