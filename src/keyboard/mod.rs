//! Keyboard simulation: key tokens, chord selection, and the injector seam

mod chord;
mod injector;

pub use chord::{Key, ShortcutChord};
pub use injector::{EnigoInjector, InjectError, KeyInjector};
