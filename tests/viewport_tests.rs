//! Viewport Tests
//!
//! Tests for:
//! - Frame callback registry: ordering of time, dt clamping, removal
//! - Key listener registry: dispatch and removal
//! - World matrix refresh after callbacks

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec3;
use mascot::app::viewport::{FrameState, Viewport};
use mascot::input::{InputTracker, Key, KeyEvent};
use mascot::scene::Scene;

#[test]
fn frame_passes_accumulated_time() {
    let mut viewport = Viewport::new();
    let mut scene = Scene::new();
    let seen: Rc<RefCell<Vec<FrameState>>> = Rc::default();

    let sink = seen.clone();
    viewport.add_frame_callback(move |_, frame| sink.borrow_mut().push(*frame));

    viewport.frame(&mut scene, 0.5);
    viewport.frame(&mut scene, 0.25);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].frame_count, 2);
    assert_eq!(seen[1].dt, 0.25);
    assert_eq!(seen[1].time, 0.75);
}

#[test]
fn negative_or_nan_dt_is_clamped() {
    let mut viewport = Viewport::new();
    let mut scene = Scene::new();
    assert_eq!(viewport.frame(&mut scene, -1.0).dt, 0.0);
    assert_eq!(viewport.frame(&mut scene, f32::NAN).dt, 0.0);
}

#[test]
fn removed_frame_callback_stops_running() {
    let mut viewport = Viewport::new();
    let mut scene = Scene::new();
    let calls = Rc::new(Cell::new(0));

    let counter = calls.clone();
    let id = viewport.add_frame_callback(move |_, _| counter.set(counter.get() + 1));
    viewport.frame(&mut scene, 0.016);

    assert!(viewport.remove_frame_callback(id));
    assert!(!viewport.remove_frame_callback(id));
    viewport.frame(&mut scene, 0.016);

    assert_eq!(calls.get(), 1);
    assert_eq!(viewport.frame_callback_count(), 0);
}

#[test]
fn key_listeners_receive_events() {
    let mut viewport = Viewport::new();
    let tracker = Rc::new(RefCell::new(InputTracker::new()));

    let t = tracker.clone();
    let id = viewport.add_key_listener(move |event| {
        t.borrow_mut().apply(event);
    });

    viewport.dispatch_key(&KeyEvent::pressed(Key::ArrowLeft));
    assert!(tracker.borrow().snapshot().left);

    assert!(viewport.remove_key_listener(id));
    viewport.dispatch_key(&KeyEvent::released(Key::ArrowLeft));
    assert!(tracker.borrow().snapshot().left, "listener was removed");
    assert_eq!(viewport.key_listener_count(), 0);
}

#[test]
fn frame_refreshes_world_matrices_after_callbacks() {
    let mut viewport = Viewport::new();
    let mut scene = Scene::new();
    let node = scene.create_node();

    viewport.add_frame_callback(move |scene, _| {
        if let Some(n) = scene.get_node_mut(node) {
            n.transform.position = Vec3::new(2.0, 0.0, 0.0);
        }
    });
    viewport.frame(&mut scene, 0.016);

    let x = scene.get_node(node).unwrap().world_matrix().translation.x;
    assert_eq!(x, 2.0);
}
