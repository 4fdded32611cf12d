//! keytrigger-press: one-shot delayed F16 key press
//!
//! Checks the platform once up front, waits the grace period, presses F16,
//! and exits. No state beyond idle, counting down, pressed.

use anyhow::Result;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keytrigger::config;
use keytrigger::keyboard::{EnigoInjector, Key, KeyInjector};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Gate once, before the countdown; not re-checked afterwards
    if std::env::consts::OS != "macos" {
        warn!("F16 press is only supported on macOS, exiting");
        return Ok(());
    }

    let grace = std::time::Duration::from_secs(config::grace_secs_from_env());
    info!(
        secs = grace.as_secs(),
        "pressing F16 soon, switch to the target window"
    );
    sleep(grace).await;

    let injector = EnigoInjector::new();
    injector.press_key(Key::F16)?;

    info!("F16 pressed");

    Ok(())
}
