//! keytrigger: delayed keyboard-shortcut automation for macOS
//!
//! Library backing two binaries:
//! - `keytriggerd`: a daemon owning a recording session (start/stop
//!   lifecycle, transcript log, background shortcut trigger) driven over a
//!   Unix socket IPC surface
//! - `keytrigger-press`: a one-shot delayed F16 key press

pub mod config;
pub mod events;
pub mod ipc;
pub mod keyboard;
pub mod lifecycle;
pub mod session;
