//! Recording session lifecycle
//!
//! A session is started and stopped by external commands. Starting spawns
//! one background worker that fires the shortcut chord after a grace
//! period; stopping signals the worker, presses Escape, and marks the
//! transcript with a sentinel line.

mod controller;
pub(crate) mod worker;

pub use controller::{SessionController, STOP_SENTINEL};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use crate::keyboard::{InjectError, Key, KeyInjector};

    /// Records every injection instead of touching the OS
    #[derive(Default)]
    pub struct MockInjector {
        pub chords: Mutex<Vec<Vec<Key>>>,
        pub keys: Mutex<Vec<Key>>,
    }

    impl KeyInjector for MockInjector {
        fn press_chord(&self, keys: &[Key]) -> Result<(), InjectError> {
            self.chords.lock().unwrap().push(keys.to_vec());
            Ok(())
        }

        fn press_key(&self, key: Key) -> Result<(), InjectError> {
            self.keys.lock().unwrap().push(key);
            Ok(())
        }
    }
}
