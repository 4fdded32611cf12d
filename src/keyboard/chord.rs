//! Key tokens and platform-dependent chord selection
//!
//! The chord variant is resolved once when a session's worker starts, not
//! re-checked afterwards.

/// Named key tokens understood by the injector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Control,
    Shift,
    Alt,
    Equals,
    Escape,
    F16,
}

impl Key {
    /// Map to the backend key code
    pub(crate) fn to_enigo(self) -> enigo::Key {
        match self {
            Key::Control => enigo::Key::Control,
            Key::Shift => enigo::Key::Shift,
            Key::Alt => enigo::Key::Alt,
            Key::Equals => enigo::Key::Unicode('='),
            Key::Escape => enigo::Key::Escape,
            Key::F16 => enigo::Key::F16,
        }
    }
}

/// The shortcut chord fired after the grace period
///
/// macOS gets Control+Shift+'='; everything else falls back to
/// Control+Alt+'='.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutChord {
    MacOs,
    Fallback,
}

impl ShortcutChord {
    /// Resolve the chord for the host platform
    pub fn resolve() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Resolve the chord for a named platform
    pub fn for_os(os: &str) -> Self {
        if os == "macos" {
            Self::MacOs
        } else {
            Self::Fallback
        }
    }

    /// The keys pressed together as one chord
    pub fn keys(self) -> [Key; 3] {
        match self {
            Self::MacOs => [Key::Control, Key::Shift, Key::Equals],
            Self::Fallback => [Key::Control, Key::Alt, Key::Equals],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macos_chord() {
        let chord = ShortcutChord::for_os("macos");
        assert_eq!(chord, ShortcutChord::MacOs);
        assert_eq!(chord.keys(), [Key::Control, Key::Shift, Key::Equals]);
    }

    #[test]
    fn test_fallback_chord() {
        for os in ["linux", "windows", "freebsd"] {
            let chord = ShortcutChord::for_os(os);
            assert_eq!(chord, ShortcutChord::Fallback);
            assert_eq!(chord.keys(), [Key::Control, Key::Alt, Key::Equals]);
        }
    }

    #[test]
    fn test_resolve_matches_host() {
        assert_eq!(
            ShortcutChord::resolve(),
            ShortcutChord::for_os(std::env::consts::OS)
        );
    }
}
