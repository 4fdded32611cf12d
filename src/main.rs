//! keytriggerd: recording-session daemon
//!
//! Owns one session controller and exposes it over a Unix socket:
//! - Start spawns a worker that presses the shortcut chord after a grace
//!   period and then idles until stopped
//! - Stop signals the worker, presses Escape, and marks the transcript
//! - AddText/ClearTranscript/GetTranscript manage the transcript log
//!
//! The UI (menu bar app, script, `nc`-style client) is a separate program;
//! this daemon only reacts to requests.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keytrigger::config::Config;
use keytrigger::events::SessionEvent;
use keytrigger::ipc::Server;
use keytrigger::keyboard::{EnigoInjector, KeyInjector};
use keytrigger::lifecycle;
use keytrigger::session::SessionController;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "keytriggerd starting");

    if std::env::consts::OS != "macos" {
        warn!("designed for macOS, using the fallback shortcut chord on this platform");
    }

    // Load configuration
    let config = Config::load()?;
    config.ensure_dirs()?;
    info!(?config.socket_path, grace_secs = config.grace_period.as_secs(), "configuration loaded");

    // Session events, consumed by the logging loop below
    let (event_tx, mut event_rx) = broadcast::channel::<SessionEvent>(64);

    let injector: Arc<dyn KeyInjector> = Arc::new(EnigoInjector::new());
    let controller = Arc::new(Mutex::new(SessionController::new(
        injector,
        event_tx,
        config.grace_period,
    )));

    let server = Server::new(&config.socket_path, Arc::clone(&controller))?;

    info!("daemon initialized, entering main loop");

    // Main event loop
    tokio::select! {
        // Run the IPC server (accepts client connections)
        result = server.run() => {
            if let Err(e) = result {
                tracing::error!(?e, "IPC server error");
            }
        }

        // Log session events as they happen
        _ = log_session_events(&mut event_rx) => {
            info!("session event handler exited");
        }

        // Wait for shutdown signal
        _ = lifecycle::wait_for_shutdown() => {
            info!("shutdown signal received");
        }
    }

    // Cleanup
    info!("shutting down...");

    let mut controller = controller.lock().await;
    if controller.is_recording() {
        controller.stop();
    }
    drop(controller);

    server.shutdown().await;

    info!("keytriggerd stopped");

    Ok(())
}

/// Drain session events into the log until the channel closes
async fn log_session_events(event_rx: &mut broadcast::Receiver<SessionEvent>) {
    loop {
        match event_rx.recv().await {
            Ok(event) => {
                info!(%event, "session event");
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "session event receiver lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                break;
            }
        }
    }
}
