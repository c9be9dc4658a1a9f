//! Reflex: a reaction-time arcade game controller.
//!
//! The controller is a small state machine driven by two buttons (coin and
//! go/stop) and by its own timers. Timers are scheduled through a pluggable
//! `Scheduler`; every state change, whether from a button or a timer, is
//! serialized behind one lock, and at most one timer is ever pending.
//!
//! # Core Concepts
//!
//! - **Phase**: where the machine is (`Idle`, `WaitingForStart`, ...)
//! - **Ports**: the display sink, delay source and clock the machine uses
//! - **Scheduler**: runs one deferred transition after a delay, cancellably
//! - **Controller**: `initialize`, `coin_inserted`, `go_stop_pressed`
//!
//! # Example
//!
//! ```rust
//! use reflex::ports::{FixedDelay, RecordingDisplay};
//! use reflex::scheduler::ManualScheduler;
//! use reflex::ReactionController;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let display = Arc::new(RecordingDisplay::new());
//! let scheduler = Arc::new(ManualScheduler::new());
//! let controller = ReactionController::builder()
//!     .display(display.clone())
//!     .scheduler(scheduler.clone())
//!     .clock(scheduler.clone())
//!     .delay_source(Arc::new(FixedDelay(2)))
//!     .build()
//!     .unwrap();
//!
//! controller.initialize();
//! controller.coin_inserted();
//! controller.go_stop_pressed();
//! scheduler.advance(Duration::from_secs(2));
//! assert_eq!(display.current().as_deref(), Some("2.00"));
//!
//! // Each further round: a pause, then another reaction wait.
//! for _ in 0..2 {
//!     controller.go_stop_pressed();
//!     scheduler.advance(Duration::from_secs(4));
//! }
//! controller.go_stop_pressed();
//! assert_eq!(display.current().as_deref(), Some("Average = 2.00"));
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod core;
pub mod ports;
pub mod scheduler;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, ControllerBuilder};
pub use config::{ConfigError, DelayPolicy, GameConfig};
pub use controller::ReactionController;
pub use crate::core::{Deferred, Phase, PhaseHistory, PhaseTransition, Trigger};
pub use snapshot::{GameSnapshot, SnapshotError};
