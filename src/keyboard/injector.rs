//! Key injection backed by enigo
//!
//! The trait is the seam between the session machinery and the OS: tests
//! substitute a recording fake, production goes through enigo. A fresh
//! enigo handle is built per injection so the injector stays `Sync` and
//! needs no interior mutability.

use enigo::{
    Direction::{Click, Press, Release},
    Enigo, Keyboard, Settings,
};
use thiserror::Error;

use super::chord::Key;

/// Errors from the key-simulation backend
#[derive(Debug, Error)]
pub enum InjectError {
    /// Could not establish a connection to the platform input system
    #[error("input backend unavailable: {0}")]
    Backend(#[from] enigo::NewConError),

    /// A key press or release was rejected
    #[error("key injection failed: {0}")]
    Input(#[from] enigo::InputError),
}

/// Fire-and-forget key simulation
pub trait KeyInjector: Send + Sync {
    /// Press the given keys together as one chord, then release in reverse
    fn press_chord(&self, keys: &[Key]) -> Result<(), InjectError>;

    /// Click a single key
    fn press_key(&self, key: Key) -> Result<(), InjectError>;
}

/// Production injector using enigo
pub struct EnigoInjector;

impl EnigoInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInjector for EnigoInjector {
    fn press_chord(&self, keys: &[Key]) -> Result<(), InjectError> {
        let mut enigo = Enigo::new(&Settings::default())?;

        for key in keys {
            enigo.key(key.to_enigo(), Press)?;
        }
        for key in keys.iter().rev() {
            enigo.key(key.to_enigo(), Release)?;
        }

        Ok(())
    }

    fn press_key(&self, key: Key) -> Result<(), InjectError> {
        let mut enigo = Enigo::new(&Settings::default())?;
        enigo.key(key.to_enigo(), Click)?;
        Ok(())
    }
}
