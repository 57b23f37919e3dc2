//! Transform Tests
//!
//! Tests for:
//! - Dirty checking of the local matrix
//! - Euler angle round trips (XYZ order)
//! - look_at orientation

use glam::{Affine3A, Quat, Vec3};
use mascot::scene::Transform;

const EPSILON: f32 = 1e-5;

fn vec_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

#[test]
fn new_transform_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
    assert_eq!(*t.local_matrix(), Affine3A::IDENTITY);
}

#[test]
fn update_local_matrix_only_when_changed() {
    let mut t = Transform::new();
    t.update_local_matrix();
    assert!(!t.update_local_matrix());

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());
    assert!(vec_approx(Vec3::from(t.local_matrix().translation), Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn mark_dirty_forces_rebuild() {
    let mut t = Transform::new();
    t.update_local_matrix();
    t.mark_dirty();
    assert!(t.update_local_matrix());
}

#[test]
fn euler_round_trip() {
    let mut t = Transform::new();
    t.set_rotation_euler(-0.1, 0.2, 0.0);
    let e = t.rotation_euler();
    assert!(vec_approx(e, Vec3::new(-0.1, 0.2, 0.0)));
}

#[test]
fn euler_yaw_rotates_forward_axis() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.0, std::f32::consts::FRAC_PI_2, 0.0);
    let forward = t.rotation * Vec3::Z;
    assert!(vec_approx(forward, Vec3::X));
}

#[test]
fn from_trs_composes_scale_then_translation() {
    let mut t = Transform::from_trs(Vec3::new(0.0, -4.0, 0.0), Quat::IDENTITY, Vec3::splat(3.0));
    t.update_local_matrix();
    let p = t.local_matrix().transform_point3(Vec3::new(0.2, 1.3, 0.4));
    assert!(vec_approx(p, Vec3::new(0.6, -0.1, 1.2)));
}

#[test]
fn look_at_points_negative_z_at_target() {
    let mut t = Transform::new();
    t.position = Vec3::new(0.0, 0.0, 5.0);
    t.look_at(Vec3::ZERO, Vec3::Y);
    let forward = t.rotation * Vec3::NEG_Z;
    assert!(vec_approx(forward, Vec3::NEG_Z));
}

#[test]
fn look_at_degenerate_keeps_rotation() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.3, 0.0, 0.0);
    let before = t.rotation;
    t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
    assert_eq!(t.rotation, before);
}
