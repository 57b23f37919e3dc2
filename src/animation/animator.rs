use glam::Vec2;

use crate::animation::pose::{MascotRig, PoseSettings, apply_pose};
use crate::animation::smoothing::{PoseSmoother, SmoothingSettings};
use crate::input::KeyState;
use crate::scene::Scene;

/// Per-frame driver: key snapshot -> smoother -> pose applicator.
///
/// The smoother runs every frame. The applicator only runs once a rig is
/// attached and all of its nodes are still alive.
#[derive(Debug, Clone)]
pub struct EyeTrackingAnimator {
    smoother: PoseSmoother,
    pose: PoseSettings,
    rig: Option<MascotRig>,
}

impl Default for EyeTrackingAnimator {
    fn default() -> Self {
        Self::new(PoseSettings::default(), SmoothingSettings::default())
    }
}

impl EyeTrackingAnimator {
    #[must_use]
    pub fn new(pose: PoseSettings, smoothing: SmoothingSettings) -> Self {
        Self {
            smoother: PoseSmoother::new(smoothing),
            pose,
            rig: None,
        }
    }

    pub fn set_rig(&mut self, rig: MascotRig) {
        self.rig = Some(rig);
    }

    pub fn clear_rig(&mut self) -> Option<MascotRig> {
        self.rig.take()
    }

    #[must_use]
    pub fn rig(&self) -> Option<&MascotRig> {
        self.rig.as_ref()
    }

    #[must_use]
    pub fn smoothed_position(&self) -> Vec2 {
        self.smoother.position()
    }

    #[must_use]
    pub fn target_direction(&self) -> Vec2 {
        self.smoother.target()
    }

    #[must_use]
    pub fn pose_settings(&self) -> &PoseSettings {
        &self.pose
    }

    pub fn reset(&mut self) {
        self.smoother.reset();
        self.rig = None;
    }

    /// Advances one frame. Returns whether the pose was written to the scene.
    pub fn update(&mut self, scene: &mut Scene, keys: &KeyState, dt: f32) -> bool {
        let factor = self.smoother.step(keys, dt);

        let Some(rig) = &self.rig else {
            return false;
        };
        apply_pose(scene, rig, self.smoother.position(), factor, &self.pose)
    }
}
