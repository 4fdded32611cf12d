//! Session controller: the start/stop state machine
//!
//! Owns all session state explicitly; nothing is shared with the worker
//! except the stop channel. `recording` is written and read only from the
//! controller's own context, so starting and stopping never race the
//! worker.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::events::SessionEvent;
use crate::keyboard::{Key, KeyInjector, ShortcutChord};

use super::worker;

/// Line appended to the transcript when a session stops
pub const STOP_SENTINEL: &str = "--- Recording stopped ---";

/// Controls the recording session lifecycle and the transcript log
pub struct SessionController {
    /// Whether a session is active
    recording: bool,
    /// When the current session started
    started_at: Option<Instant>,
    /// Ordered log of user-entered lines
    transcript: Vec<String>,
    /// Stop signal for the current worker, present only while recording
    stop_tx: Option<watch::Sender<bool>>,
    /// Key simulation backend, injected so the worker never captures
    /// hidden shared state
    injector: Arc<dyn KeyInjector>,
    /// Channel for emitting session events
    event_tx: broadcast::Sender<SessionEvent>,
    /// Grace period before the shortcut fires
    grace: Duration,
}

impl SessionController {
    /// Create a new controller in the idle state
    pub fn new(
        injector: Arc<dyn KeyInjector>,
        event_tx: broadcast::Sender<SessionEvent>,
        grace: Duration,
    ) -> Self {
        Self {
            recording: false,
            started_at: None,
            transcript: Vec::new(),
            stop_tx: None,
            injector,
            event_tx,
            grace,
        }
    }

    /// Whether a session is currently active
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// The transcript lines logged so far
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Start a recording session and spawn its trigger worker
    ///
    /// Guarded internally: a second call while a session is active is a
    /// no-op, independent of whatever controls the caller disables.
    pub fn start(&mut self) {
        if self.recording {
            warn!("start ignored, session already active");
            return;
        }

        self.recording = true;
        self.started_at = Some(Instant::now());

        let (stop_tx, stop_rx) = watch::channel(false);
        self.stop_tx = Some(stop_tx);

        let chord = ShortcutChord::resolve();
        info!(?chord, grace_secs = self.grace.as_secs(), "session started");

        // Detached on purpose: the worker must not block shutdown, and
        // the stop channel is the only way it is told to exit.
        tokio::spawn(worker::run(
            Arc::clone(&self.injector),
            chord,
            self.grace,
            stop_rx,
            self.event_tx.clone(),
        ));

        let _ = self.event_tx.send(SessionEvent::RecordingStarted);
    }

    /// Stop the active session
    ///
    /// Signals the worker, presses Escape, and appends the sentinel line.
    /// A no-op when no session is active.
    pub fn stop(&mut self) {
        if !self.recording {
            debug!("stop ignored, no active session");
            return;
        }

        self.recording = false;

        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }

        // Escape cancels whatever the shortcut put the target app into.
        // Failure here must not prevent the session from closing out.
        if let Err(e) = self.injector.press_key(Key::Escape) {
            error!(?e, "failed to press Escape");
        }

        self.transcript.push(STOP_SENTINEL.to_string());

        let duration_ms = self
            .started_at
            .take()
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0);

        info!(duration_ms, "session stopped");
        let _ = self
            .event_tx
            .send(SessionEvent::RecordingStopped { duration_ms });
    }

    /// Append a line to the transcript; empty input is ignored
    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.transcript.push(text.to_string());
    }

    /// Remove all transcript lines
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }
}
