//! Display sink: where the controller writes its messages.

use parking_lot::Mutex;

/// Accepts a text message to show on the machine's display.
///
/// Called while the controller holds its state lock, so implementations must
/// not call back into the controller.
pub trait DisplaySink: Send + Sync {
    fn set_display(&self, text: &str);
}

/// Keeps every message it was given; the last one is "on screen".
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    messages: Mutex<Vec<String>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The message currently shown, if any.
    pub fn current(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }

    /// Every message shown so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Number of messages shown so far.
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_display(&self, text: &str) {
        self.messages.lock().push(text.to_string());
    }
}

/// Emits display messages as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDisplay;

impl DisplaySink for TracingDisplay {
    fn set_display(&self, text: &str) {
        tracing::info!(display = text, "display updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_display_tracks_current_message() {
        let display = RecordingDisplay::new();
        assert!(display.current().is_none());
        assert!(display.is_empty());

        display.set_display("Insert coin");
        display.set_display("Press Go");

        assert_eq!(display.current().as_deref(), Some("Press Go"));
        assert_eq!(display.messages(), vec!["Insert coin", "Press Go"]);
        assert_eq!(display.len(), 2);
    }
}
