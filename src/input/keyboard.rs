//! Keyboard hold state.
//!
//! The reader keeps the set of keys currently held down and the modifier flags
//! reported by the most recent key-down. It never talks to a platform itself:
//! the frame driver forwards [`KeyNotification`]s as they arrive.

use std::collections::HashSet;
use tracing::debug;

/// Modifier flags as reported by a key event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };
}

/// Raw key notification forwarded from the platform.
///
/// Key identifiers follow the browser `KeyboardEvent.key` naming: lowercase
/// letters (`"w"`), `"ArrowUp"` and friends for the arrow keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyNotification {
    Down { key: String, modifiers: Modifiers },
    Up { key: String },
}

#[derive(Clone, Debug, Default)]
pub struct KeyboardReader {
    held: HashSet<String>,
    modifiers: Modifiers,
}

impl KeyboardReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, notification: KeyNotification) {
        match notification {
            KeyNotification::Down { key, modifiers } => self.on_key_down(&key, modifiers),
            KeyNotification::Up { key } => self.on_key_up(&key),
        }
    }

    /// Marks `key` as held and overwrites all four modifier flags.
    pub fn on_key_down(&mut self, key: &str, modifiers: Modifiers) {
        if !self.held.contains(key) {
            debug!("Key down: {} ({:?})", key, modifiers);
            self.held.insert(key.to_owned());
        }
        self.modifiers = modifiers;
    }

    /// Releases `key`. Modifier flags are left as they were.
    pub fn on_key_up(&mut self, key: &str) {
        if self.held.remove(key) {
            debug!("Key up: {}", key);
        }
    }

    /// Forgets every held key and modifier.
    ///
    /// Platforms stop delivering key-up events to unfocused windows, so the
    /// driver calls this on focus loss.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            debug!("Releasing {} held keys", self.held.len());
        }
        self.held.clear();
        self.modifiers = Modifiers::NONE;
    }

    pub fn is_key_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// True if any of `keys` is held.
    pub fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.is_key_held(key))
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_ctrl_held(&self) -> bool {
        self.modifiers.ctrl
    }

    pub fn is_alt_held(&self) -> bool {
        self.modifiers.alt
    }

    pub fn is_shift_held(&self) -> bool {
        self.modifiers.shift
    }

    /// The meta key is the Windows key on PC keyboards and Command on Mac.
    ///
    /// The window driver only sees Command: egui reports no Windows or Super
    /// key, so this stays false there on Windows and Linux.
    pub fn is_meta_held(&self) -> bool {
        self.modifiers.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_set_tracks_down_and_up() {
        let mut keys = KeyboardReader::new();
        keys.on_key_down("w", Modifiers::NONE);
        keys.on_key_down("a", Modifiers::NONE);
        assert!(keys.is_key_held("w"));
        assert!(keys.is_key_held("a"));

        keys.on_key_up("w");
        assert!(!keys.is_key_held("w"));
        assert!(keys.is_key_held("a"));
        assert_eq!(keys.held_count(), 1);
    }

    #[test]
    fn repeated_down_and_stray_up_keep_net_state() {
        let mut keys = KeyboardReader::new();
        keys.on_key_up("d");
        assert_eq!(keys.held_count(), 0);

        keys.on_key_down("d", Modifiers::NONE);
        keys.on_key_down("d", Modifiers::NONE);
        assert_eq!(keys.held_count(), 1);

        keys.on_key_up("d");
        keys.on_key_up("d");
        assert!(!keys.is_key_held("d"));
        assert_eq!(keys.held_count(), 0);
    }

    #[test]
    fn modifiers_follow_latest_key_down_only() {
        let mut keys = KeyboardReader::new();
        keys.on_key_down("d", Modifiers::SHIFT);
        assert!(keys.is_shift_held());

        // Key-up does not recompute modifiers, the flag stays stale.
        keys.on_key_up("d");
        assert!(keys.is_shift_held());

        keys.on_key_down(
            "a",
            Modifiers {
                ctrl: true,
                meta: true,
                ..Modifiers::NONE
            },
        );
        assert!(!keys.is_shift_held());
        assert!(keys.is_ctrl_held());
        assert!(keys.is_meta_held());
        assert!(!keys.is_alt_held());
    }

    #[test]
    fn notifications_dispatch_to_handlers() {
        let mut keys = KeyboardReader::new();
        keys.notify(KeyNotification::Down {
            key: "ArrowLeft".into(),
            modifiers: Modifiers {
                alt: true,
                ..Modifiers::NONE
            },
        });
        assert!(keys.is_key_held("ArrowLeft"));
        assert!(keys.is_alt_held());

        keys.notify(KeyNotification::Up {
            key: "ArrowLeft".into(),
        });
        assert!(!keys.is_key_held("ArrowLeft"));
    }

    #[test]
    fn release_all_clears_keys_and_modifiers() {
        let mut keys = KeyboardReader::new();
        keys.on_key_down("s", Modifiers::SHIFT);
        keys.on_key_down("d", Modifiers::SHIFT);
        keys.release_all();
        assert_eq!(keys.held_count(), 0);
        assert_eq!(keys.modifiers(), Modifiers::NONE);
        assert!(!keys.any_held(&["s", "d"]));
    }
}
