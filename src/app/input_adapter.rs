//! Winit input adapter
//!
//! Translates winit keyboard events into the platform-agnostic input types.

use winit::event::{ElementState, KeyEvent as WinitKeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{ButtonState, Key, KeyEvent};

/// Maps a physical key to [`Key`]. Anything but the arrows is `Unidentified`.
#[must_use]
pub fn translate_key(physical_key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical_key else {
        return Key::Unidentified;
    };

    match code {
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        _ => Key::Unidentified,
    }
}

#[must_use]
pub fn translate_element_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// Key-repeat events come through as presses; applying them is idempotent.
#[must_use]
pub fn translate_key_event(event: &WinitKeyEvent) -> KeyEvent {
    KeyEvent {
        key: translate_key(event.physical_key),
        state: translate_element_state(event.state),
    }
}
