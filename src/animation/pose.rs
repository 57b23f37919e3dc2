use glam::{Vec2, Vec3};

use crate::scene::{NodeHandle, Scene};

/// Constants mapping the smoothed look direction onto the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSettings {
    pub move_factor: f32,
    /// Symmetric clamp on the pupil X / Y offset.
    pub max_offset: f32,
    /// Pupil depth when looking straight ahead.
    pub forward_z: f32,
    /// Pupil depth at full deflection.
    pub back_z: f32,
    pub body_yaw_factor: f32,
    pub body_pitch_factor: f32,
}

impl Default for PoseSettings {
    fn default() -> Self {
        Self {
            move_factor: 0.05,
            max_offset: 0.06,
            forward_z: 0.12,
            back_z: 0.08,
            body_yaw_factor: 0.2,
            body_pitch_factor: 0.1,
        }
    }
}

impl PoseSettings {
    #[must_use]
    pub fn with_move_factor(mut self, move_factor: f32) -> Self {
        self.move_factor = move_factor;
        self
    }

    #[must_use]
    pub fn with_max_offset(mut self, max_offset: f32) -> Self {
        self.max_offset = max_offset;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, forward_z: f32, back_z: f32) -> Self {
        self.forward_z = forward_z;
        self.back_z = back_z;
        self
    }

    #[must_use]
    pub fn with_body_factors(mut self, yaw: f32, pitch: f32) -> Self {
        self.body_yaw_factor = yaw;
        self.body_pitch_factor = pitch;
        self
    }
}

/// Local pupil position for a smoothed look direction.
///
/// X / Y are clamped to `±max_offset`; Z recedes linearly from `forward_z` to
/// `back_z` as the look distance goes from 0 to 1 and stays at `back_z` beyond.
#[must_use]
pub fn eye_offset(smoothed: Vec2, settings: &PoseSettings) -> Vec3 {
    let max = settings.max_offset;
    let x = (smoothed.x * settings.move_factor).clamp(-max, max);
    let y = (smoothed.y * settings.move_factor).clamp(-max, max);

    let distance = smoothed.length().min(1.0);
    let z = settings.forward_z - distance * (settings.forward_z - settings.back_z);

    Vec3::new(x, y, z)
}

/// Target body rotation as `(pitch_x, yaw_y)` Euler angles.
#[must_use]
pub fn body_target(smoothed: Vec2, settings: &PoseSettings) -> Vec2 {
    Vec2::new(
        -smoothed.y * settings.body_pitch_factor,
        smoothed.x * settings.body_yaw_factor,
    )
}

/// Scene nodes driven by the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MascotRig {
    pub body: NodeHandle,
    pub left_pupil: NodeHandle,
    pub right_pupil: NodeHandle,
}

/// Writes the pose into the scene.
///
/// Pupils take the offset directly; the body rotation moves toward its target
/// by `factor`. Returns `false` without touching anything if any rig node is
/// missing from the scene.
pub fn apply_pose(
    scene: &mut Scene,
    rig: &MascotRig,
    smoothed: Vec2,
    factor: f32,
    settings: &PoseSettings,
) -> bool {
    let nodes = &scene.nodes;
    if !(nodes.contains_key(rig.body)
        && nodes.contains_key(rig.left_pupil)
        && nodes.contains_key(rig.right_pupil))
    {
        return false;
    }

    let offset = eye_offset(smoothed, settings);
    for pupil in [rig.left_pupil, rig.right_pupil] {
        if let Some(node) = scene.get_node_mut(pupil) {
            node.transform.position = offset;
        }
    }

    let target = body_target(smoothed, settings);
    if let Some(body) = scene.get_node_mut(rig.body) {
        let current = body.transform.rotation_euler();
        let x = current.x + (target.x - current.x) * factor;
        let y = current.y + (target.y - current.y) * factor;
        body.transform.set_rotation_euler(x, y, current.z);
    }

    true
}
