//! Events emitted by the session controller and its worker
//!
//! Broadcast to the daemon's main loop for logging, and available to any
//! future IPC subscriber.

use serde::{Deserialize, Serialize};

/// Events emitted across a recording session's lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A recording session started; the worker is counting down
    RecordingStarted,

    /// The worker pressed the shortcut chord after the grace period
    ShortcutTriggered,

    /// The session was stopped
    RecordingStopped {
        /// Duration in milliseconds that the session was active
        duration_ms: u64,
    },
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::RecordingStarted => write!(f, "RECORDING_STARTED"),
            SessionEvent::ShortcutTriggered => write!(f, "SHORTCUT_TRIGGERED"),
            SessionEvent::RecordingStopped { duration_ms } => {
                write!(f, "RECORDING_STOPPED ({}ms)", duration_ms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = SessionEvent::RecordingStopped { duration_ms: 1500 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("recording_stopped"));
        assert!(json.contains("1500"));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"shortcut_triggered"}"#;
        let event: SessionEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, SessionEvent::ShortcutTriggered));
    }

    #[test]
    fn test_event_display() {
        let event = SessionEvent::RecordingStopped { duration_ms: 250 };
        assert_eq!(event.to_string(), "RECORDING_STOPPED (250ms)");
    }
}
