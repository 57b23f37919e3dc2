//! Platform-agnostic input system
//!
//! Defines the key types and the held-key state container used by the mascot.
//! Platform adapters (see [`crate::app::input_adapter`]) translate window-system
//! events into these types before they reach the tracker.

/// Keyboard key enumeration (platform-agnostic).
///
/// Only the arrow keys carry meaning for the mascot. Everything else is folded
/// into [`Key::Unidentified`] and ignored by the [`InputTracker`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Unidentified,
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A single key-down or key-up event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: ButtonState,
}

impl KeyEvent {
    #[must_use]
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: ButtonState::Pressed,
        }
    }

    #[must_use]
    pub fn released(key: Key) -> Self {
        Self {
            key,
            state: ButtonState::Released,
        }
    }
}

/// The four directional keys tracked by [`KeyState`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    pub const ALL: [ArrowKey; 4] = [ArrowKey::Up, ArrowKey::Down, ArrowKey::Left, ArrowKey::Right];

    /// Maps a generic key onto a tracked direction, `None` for untracked keys.
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(ArrowKey::Up),
            Key::ArrowDown => Some(ArrowKey::Down),
            Key::ArrowLeft => Some(ArrowKey::Left),
            Key::ArrowRight => Some(ArrowKey::Right),
            Key::Unidentified => None,
        }
    }
}

/// Held/released flag for each of the four directional keys.
///
/// Created with every key released. Written by keyboard events, read by the
/// frame loop.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_held(&self, key: ArrowKey) -> bool {
        match key {
            ArrowKey::Up => self.up,
            ArrowKey::Down => self.down,
            ArrowKey::Left => self.left,
            ArrowKey::Right => self.right,
        }
    }

    /// Sets the flag for `key`, returning `true` if it changed.
    pub fn set(&mut self, key: ArrowKey, held: bool) -> bool {
        let slot = match key {
            ArrowKey::Up => &mut self.up,
            ArrowKey::Down => &mut self.down,
            ArrowKey::Left => &mut self.left,
            ArrowKey::Right => &mut self.right,
        };
        let changed = *slot != held;
        *slot = held;
        changed
    }

    /// Returns `true` if no directional key is held.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Owns the [`KeyState`] and folds keyboard events into it.
///
/// There is no debouncing and no per-frame reset: a key stays held until its
/// release event arrives, regardless of how many frames pass in between.
#[derive(Debug, Default, Clone)]
pub struct InputTracker {
    keys: KeyState,
}

impl InputTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event. Untracked keys are ignored.
    ///
    /// Returns `true` if the held state changed.
    pub fn apply(&mut self, event: &KeyEvent) -> bool {
        let Some(arrow) = ArrowKey::from_key(event.key) else {
            return false;
        };
        let held = matches!(event.state, ButtonState::Pressed);
        self.keys.set(arrow, held)
    }

    /// Copy of the key state as of the last processed event.
    #[must_use]
    pub fn snapshot(&self) -> KeyState {
        self.keys
    }

    /// Releases every key.
    pub fn clear(&mut self) {
        self.keys = KeyState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_released() {
        let tracker = InputTracker::new();
        let keys = tracker.snapshot();
        for key in ArrowKey::ALL {
            assert!(!keys.is_held(key));
        }
        assert!(keys.is_idle());
    }

    #[test]
    fn press_then_release() {
        let mut tracker = InputTracker::new();
        assert!(tracker.apply(&KeyEvent::pressed(Key::ArrowRight)));
        assert!(tracker.snapshot().right);
        assert!(tracker.apply(&KeyEvent::released(Key::ArrowRight)));
        assert!(!tracker.snapshot().right);
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut tracker = InputTracker::new();
        assert!(tracker.apply(&KeyEvent::pressed(Key::ArrowUp)));
        assert!(!tracker.apply(&KeyEvent::pressed(Key::ArrowUp)));
        assert!(tracker.snapshot().up);
    }

    #[test]
    fn untracked_keys_are_ignored() {
        let mut tracker = InputTracker::new();
        assert!(!tracker.apply(&KeyEvent::pressed(Key::Unidentified)));
        assert_eq!(tracker.snapshot(), KeyState::default());
    }

    #[test]
    fn snapshot_is_detached_from_later_events() {
        let mut tracker = InputTracker::new();
        tracker.apply(&KeyEvent::pressed(Key::ArrowLeft));
        let frame = tracker.snapshot();
        tracker.apply(&KeyEvent::released(Key::ArrowLeft));
        assert!(frame.left);
        assert!(!tracker.snapshot().left);
    }
}
