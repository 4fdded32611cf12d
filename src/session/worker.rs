//! Background trigger task
//!
//! Spawned once per session. Counts down the grace period, presses the
//! pre-resolved shortcut chord, then idles until the stop signal is
//! observed. The chord variant is fixed at spawn time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::{error, info};

use crate::events::SessionEvent;
use crate::keyboard::{KeyInjector, ShortcutChord};

/// Run the trigger task to completion
pub(crate) async fn run(
    injector: Arc<dyn KeyInjector>,
    chord: ShortcutChord,
    grace: Duration,
    mut stop_rx: watch::Receiver<bool>,
    event_tx: broadcast::Sender<SessionEvent>,
) {
    info!(
        secs = grace.as_secs(),
        "pressing shortcut soon, switch to the target window"
    );
    tokio::time::sleep(grace).await;

    match injector.press_chord(&chord.keys()) {
        Ok(()) => {
            info!(?chord, "shortcut chord pressed");
            let _ = event_tx.send(SessionEvent::ShortcutTriggered);
        }
        Err(e) => {
            // Fatal for this task; the session itself stays active
            error!(?e, "failed to press shortcut chord");
            return;
        }
    }

    // Idle until stopped. A dropped sender also ends the task.
    while !*stop_rx.borrow_and_update() {
        if stop_rx.changed().await.is_err() {
            break;
        }
    }

    info!("trigger task exiting");
}
