//! Capabilities the controller consumes but does not own.
//!
//! - `DisplaySink`: shows a text message
//! - `DelaySource`: draws a bounded random wait length
//! - `Clock`: reads the monotonic time used to measure a round

mod clock;
mod delay;
mod display;

pub use clock::{Clock, SystemClock, TokioClock};
pub use delay::{DelaySource, FixedDelay, RandomDelay, ScriptedDelay};
pub use display::{DisplaySink, RecordingDisplay, TracingDisplay};
