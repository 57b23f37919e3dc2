//! Animation Integration Tests
//!
//! Tests for:
//! - Smoothing factor: zero at rest, monotonic, saturating
//! - Target direction: axis signs and diagonal scaling
//! - PoseSmoother: convergence, no overshoot, frame-rate independence
//! - Pose mapping: clamping and depth interpolation
//! - EyeTrackingAnimator: second-order body smoothing, missing rig

use glam::{Vec2, Vec3};
use mascot::animation::{
    EyeTrackingAnimator, MascotRig, PoseSettings, PoseSmoother, SmoothingSettings, apply_pose,
    body_target, eye_offset, smoothing_factor, target_direction,
};
use mascot::input::KeyState;
use mascot::scene::{Node, Scene};

const EPSILON: f32 = 1e-5;
const DIAGONAL: f32 = 0.707_106_78;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn held(up: bool, down: bool, left: bool, right: bool) -> KeyState {
    KeyState { up, down, left, right }
}

// ============================================================================
// Smoothing factor
// ============================================================================

#[test]
fn factor_zero_at_zero_delta() {
    assert_eq!(smoothing_factor(0.1, 0.0), 0.0);
}

#[test]
fn factor_strictly_increasing() {
    let mut previous = smoothing_factor(0.1, 0.0);
    for i in 1..=100 {
        let f = smoothing_factor(0.1, i as f32 * 0.01);
        assert!(f > previous, "f({}) = {f} not > {previous}", i as f32 * 0.01);
        previous = f;
    }
}

#[test]
fn factor_tends_to_one() {
    assert!(smoothing_factor(0.1, 10.0) > 0.999_999);
    assert!(smoothing_factor(0.1, 1000.0) <= 1.0);
}

#[test]
fn factor_at_sixty_hz() {
    let f = smoothing_factor(0.1, 1.0 / 60.0);
    let expected = 1.0 - 0.1_f32.powf(1.0 / 60.0);
    assert!(approx_eq(f, expected));
    assert!(f > 0.03 && f < 0.04);
}

// ============================================================================
// Target direction
// ============================================================================

#[test]
fn direction_axes() {
    assert_eq!(target_direction(&held(false, false, true, false), DIAGONAL), Vec2::new(-1.0, 0.0));
    assert_eq!(target_direction(&held(false, false, false, true), DIAGONAL), Vec2::new(1.0, 0.0));
    assert_eq!(target_direction(&held(true, false, false, false), DIAGONAL), Vec2::new(0.0, 1.0));
    assert_eq!(target_direction(&held(false, true, false, false), DIAGONAL), Vec2::new(0.0, -1.0));
    assert_eq!(target_direction(&KeyState::default(), DIAGONAL), Vec2::ZERO);
}

#[test]
fn diagonal_left_up_is_unit_length() {
    let t = target_direction(&held(true, false, true, false), DIAGONAL);
    assert!(vec_approx(t, Vec2::new(-DIAGONAL, DIAGONAL)));
    assert!(approx_eq(t.length(), 1.0));
}

#[test]
fn three_keys_collapse_to_single_axis() {
    // Left + Right cancel, only Up remains: no diagonal scaling
    let t = target_direction(&held(true, false, true, true), DIAGONAL);
    assert_eq!(t, Vec2::new(0.0, 1.0));
}

// ============================================================================
// PoseSmoother
// ============================================================================

#[test]
fn smoother_converges_to_target() {
    let mut smoother = PoseSmoother::new(SmoothingSettings::default());
    let keys = held(false, false, false, true);

    for _ in 0..600 {
        smoother.step(&keys, 1.0 / 60.0);
    }
    assert!((smoother.position() - Vec2::X).length() < 1e-4);
}

#[test]
fn smoother_never_overshoots_single_axis() {
    let mut smoother = PoseSmoother::new(SmoothingSettings::default());
    let keys = held(false, false, false, true);

    let mut previous = 0.0;
    for _ in 0..300 {
        smoother.step(&keys, 1.0 / 30.0);
        let x = smoother.position().x;
        assert!(x <= 1.0, "overshoot: {x}");
        assert!(x >= previous, "not monotonic: {x} < {previous}");
        assert_eq!(smoother.position().y, 0.0);
        previous = x;
    }
}

#[test]
fn smoother_distance_shrinks_every_frame() {
    let mut smoother = PoseSmoother::new(SmoothingSettings::default());
    let keys = held(true, false, true, false);
    let target = target_direction(&keys, DIAGONAL);

    let mut distance = (target - smoother.position()).length();
    for dt in [0.016, 0.033, 0.005, 0.1, 0.016] {
        smoother.step(&keys, dt);
        let d = (target - smoother.position()).length();
        assert!(d < distance);
        distance = d;
    }
}

#[test]
fn smoother_is_frame_rate_independent() {
    let keys = held(false, true, false, false);

    let mut fast = PoseSmoother::new(SmoothingSettings::default());
    for _ in 0..120 {
        fast.step(&keys, 1.0 / 120.0);
    }

    let mut slow = PoseSmoother::new(SmoothingSettings::default());
    for _ in 0..30 {
        slow.step(&keys, 1.0 / 30.0);
    }

    assert!((fast.position() - slow.position()).length() < 1e-4);
    // One second at decay 0.1 closes 90% of the gap
    assert!((fast.position().y + 0.9).abs() < 1e-4);
}

#[test]
fn smoother_returns_to_rest_after_release() {
    let mut smoother = PoseSmoother::new(SmoothingSettings::default());
    smoother.step(&held(false, false, true, false), 1.0);
    assert!(smoother.position().x < 0.0);

    for _ in 0..20 {
        smoother.step(&KeyState::default(), 0.5);
    }
    assert!(smoother.position().length() < 1e-4);
}

// ============================================================================
// Pose mapping
// ============================================================================

#[test]
fn eye_offset_clamped_for_any_magnitude() {
    let settings = PoseSettings::default();
    for s in [Vec2::new(1.0, 1.0), Vec2::new(-3.0, 7.0), Vec2::new(1e6, -1e6)] {
        let offset = eye_offset(s, &settings);
        assert!(offset.x.abs() <= 0.06 + EPSILON);
        assert!(offset.y.abs() <= 0.06 + EPSILON);
    }
}

#[test]
fn eye_offset_linear_below_clamp() {
    let offset = eye_offset(Vec2::new(0.5, -0.4), &PoseSettings::default());
    assert!(approx_eq(offset.x, 0.025));
    assert!(approx_eq(offset.y, -0.02));
}

#[test]
fn eye_depth_interpolation() {
    let settings = PoseSettings::default();
    assert!(approx_eq(eye_offset(Vec2::ZERO, &settings).z, 0.12));
    assert!(approx_eq(eye_offset(Vec2::new(0.5, 0.0), &settings).z, 0.10));
    assert!(approx_eq(eye_offset(Vec2::new(0.0, -0.5), &settings).z, 0.10));
    assert!(approx_eq(eye_offset(Vec2::new(1.0, 0.0), &settings).z, 0.08));
    assert!(approx_eq(eye_offset(Vec2::new(1.0, 1.0), &settings).z, 0.08));
}

#[test]
fn body_target_follows_smoothed_position() {
    let t = body_target(Vec2::new(0.5, -0.5), &PoseSettings::default());
    assert!(approx_eq(t.x, 0.05)); // pitch = -sy * 0.1
    assert!(approx_eq(t.y, 0.1)); // yaw = sx * 0.2
}

// ============================================================================
// Applicator + animator
// ============================================================================

fn rigged_scene() -> (Scene, MascotRig) {
    let mut scene = Scene::new();
    let body = scene.create_node_with_name("body");
    let left = scene.add_to_parent(Node::with_name("left"), body);
    let right = scene.add_to_parent(Node::with_name("right"), body);
    (
        scene,
        MascotRig {
            body,
            left_pupil: left,
            right_pupil: right,
        },
    )
}

#[test]
fn apply_pose_sets_both_pupils_identically() {
    let (mut scene, rig) = rigged_scene();
    let s = Vec2::new(0.3, 0.4);
    assert!(apply_pose(&mut scene, &rig, s, 0.5, &PoseSettings::default()));

    let left = scene.get_node(rig.left_pupil).unwrap().transform.position;
    let right = scene.get_node(rig.right_pupil).unwrap().transform.position;
    assert_eq!(left, right);
    assert!((left - Vec3::new(0.015, 0.02, 0.1)).length() < EPSILON);
}

#[test]
fn apply_pose_nudges_body_by_factor() {
    let (mut scene, rig) = rigged_scene();
    assert!(apply_pose(&mut scene, &rig, Vec2::new(1.0, 0.0), 0.5, &PoseSettings::default()));

    let euler = scene.get_node(rig.body).unwrap().transform.rotation_euler();
    // Halfway from 0 to 0.2
    assert!((euler.y - 0.1).abs() < 1e-4);
    assert!(euler.x.abs() < 1e-4);
}

#[test]
fn animator_skips_without_rig() {
    let mut scene = Scene::new();
    let mut animator = EyeTrackingAnimator::default();
    assert!(!animator.update(&mut scene, &held(false, false, false, true), 0.1));
    // Smoother still advanced
    assert!(animator.smoothed_position().x > 0.0);
}

#[test]
fn animator_skips_when_rig_node_removed() {
    let (mut scene, rig) = rigged_scene();
    let mut animator = EyeTrackingAnimator::default();
    animator.set_rig(rig);
    scene.remove_node(rig.left_pupil);

    assert!(!animator.update(&mut scene, &held(true, false, false, false), 0.1));
    let right = scene.get_node(rig.right_pupil).unwrap().transform.position;
    assert_eq!(right, Vec3::ZERO);
}

#[test]
fn body_rotation_lags_eyes() {
    let (mut scene, rig) = rigged_scene();
    let mut animator = EyeTrackingAnimator::default();
    animator.set_rig(rig);

    let keys = held(false, false, false, true);
    for _ in 0..10 {
        assert!(animator.update(&mut scene, &keys, 1.0 / 60.0));
    }

    let sx = animator.smoothed_position().x;
    let yaw = scene.get_node(rig.body).unwrap().transform.rotation_euler().y;
    // Second-order smoothing: the body trails its first-order target
    assert!(yaw > 0.0);
    assert!(yaw < sx * 0.2);
}
