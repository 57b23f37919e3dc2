//! Frame-callback and key-listener registries.
//!
//! The [`Viewport`] is the seam between the window loop and scene logic:
//! the runner forwards keyboard events to [`Viewport::dispatch_key`] and calls
//! [`Viewport::frame`] once per redraw. Components register closures and keep
//! the returned ids so they can unregister on teardown.

use slotmap::{SlotMap, new_key_type};

use crate::input::KeyEvent;
use crate::scene::Scene;

new_key_type! {
    pub struct FrameCallbackId;
    pub struct KeyListenerId;
}

/// Per-frame timing handed to every frame callback.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    /// Seconds since the first frame.
    pub time: f32,
    /// Seconds since the previous frame, never negative.
    pub dt: f32,
    pub frame_count: u64,
}

pub type FrameCallback = Box<dyn FnMut(&mut Scene, &FrameState)>;
pub type KeyListener = Box<dyn FnMut(&KeyEvent)>;

#[derive(Default)]
pub struct Viewport {
    frame_callbacks: SlotMap<FrameCallbackId, FrameCallback>,
    key_listeners: SlotMap<KeyListenerId, KeyListener>,
    time: f32,
    frame_count: u64,
}

impl Viewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_frame_callback<F>(&mut self, callback: F) -> FrameCallbackId
    where
        F: FnMut(&mut Scene, &FrameState) + 'static,
    {
        self.frame_callbacks.insert(Box::new(callback))
    }

    /// Returns `false` if the id was unknown (already removed).
    pub fn remove_frame_callback(&mut self, id: FrameCallbackId) -> bool {
        self.frame_callbacks.remove(id).is_some()
    }

    pub fn add_key_listener<F>(&mut self, listener: F) -> KeyListenerId
    where
        F: FnMut(&KeyEvent) + 'static,
    {
        self.key_listeners.insert(Box::new(listener))
    }

    /// Returns `false` if the id was unknown (already removed).
    pub fn remove_key_listener(&mut self, id: KeyListenerId) -> bool {
        self.key_listeners.remove(id).is_some()
    }

    pub fn dispatch_key(&mut self, event: &KeyEvent) {
        for listener in self.key_listeners.values_mut() {
            listener(event);
        }
    }

    /// Runs every frame callback with `dt` seconds of elapsed time, then
    /// refreshes world matrices.
    pub fn frame(&mut self, scene: &mut Scene, dt: f32) -> FrameState {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;
        self.frame_count += 1;

        let state = FrameState {
            time: self.time,
            dt,
            frame_count: self.frame_count,
        };

        for callback in self.frame_callbacks.values_mut() {
            callback(scene, &state);
        }

        scene.update_matrix_world();
        state
    }

    #[must_use]
    pub fn frame_callback_count(&self) -> usize {
        self.frame_callbacks.len()
    }

    #[must_use]
    pub fn key_listener_count(&self) -> usize {
        self.key_listeners.len()
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
