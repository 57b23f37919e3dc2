//! The mascot component: model, eyes, lighting and the per-frame hookup.
//!
//! [`MascotWithEyes::mount`] registers one key listener and one frame
//! callback on a [`Viewport`]. The frame callback waits for the model, builds
//! the rig around it, flips the [`ReadySignal`] and from then on drives the
//! [`EyeTrackingAnimator`]. [`MountHandle::unmount`] removes both again.

pub mod ready;

pub use ready::{LoadState, ReadySignal};

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::animation::{EyeTrackingAnimator, MascotRig, PoseSettings, SmoothingSettings};
use crate::app::viewport::{FrameCallbackId, KeyListenerId, Viewport};
use crate::assets::{AssetServer, PendingPrefab, Prefab};
use crate::input::{InputTracker, KeyState};
use crate::resources::{Material, Mesh, SphereOptions, create_sphere};
use crate::scene::{Light, Node, NodeHandle, Scene};

/// Placement and size of the eye spheres, in group-local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeLayout {
    /// Left eye white; the right eye mirrors X.
    pub left_position: Vec3,
    pub white_radius: f32,
    pub pupil_radius: f32,
    /// Pupil rest position inside its eye white.
    pub pupil_position: Vec3,
    pub segments: u32,
}

impl Default for EyeLayout {
    fn default() -> Self {
        Self {
            left_position: Vec3::new(-0.2, 1.3, 0.4),
            white_radius: 0.12,
            pupil_radius: 0.05,
            pupil_position: Vec3::new(0.0, 0.0, 0.12),
            segments: 32,
        }
    }
}

impl EyeLayout {
    #[must_use]
    pub fn right_position(&self) -> Vec3 {
        self.left_position * Vec3::new(-1.0, 1.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MascotSettings {
    pub model_path: PathBuf,
    pub scale: f32,
    pub position: Vec3,
    pub eyes: EyeLayout,
    pub pose: PoseSettings,
    pub smoothing: SmoothingSettings,
}

impl Default for MascotSettings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/models/mascot.glb"),
            scale: 3.0,
            position: Vec3::new(0.0, -4.0, 0.0),
            eyes: EyeLayout::default(),
            pose: PoseSettings::default(),
            smoothing: SmoothingSettings::default(),
        }
    }
}

impl MascotSettings {
    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    #[must_use]
    pub fn with_transform(mut self, position: Vec3, scale: f32) -> Self {
        self.position = position;
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_pose(mut self, pose: PoseSettings) -> Self {
        self.pose = pose;
        self
    }

    #[must_use]
    pub fn with_smoothing(mut self, smoothing: SmoothingSettings) -> Self {
        self.smoothing = smoothing;
        self
    }
}

/// Ambient fill plus one key light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingSettings {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub directional_position: Vec3,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            directional_intensity: 1.0,
            directional_position: Vec3::new(5.0, 10.0, 7.5),
        }
    }
}

impl LightingSettings {
    /// Adds both lights to the scene; the directional one aims at the origin.
    pub fn add_to(&self, scene: &mut Scene) -> [NodeHandle; 2] {
        let ambient = scene.add_light(Light::new_ambient(Vec3::ONE, self.ambient_intensity));
        let sun = scene.add_light(Light::new_directional(Vec3::ONE, self.directional_intensity));
        if let Some(node) = scene.get_node_mut(sun) {
            node.transform.position = self.directional_position;
        }
        [ambient, sun]
    }
}

/// Builds the mascot group under the scene root and returns it with its rig.
///
/// Layout: `group -> { model, left eye white -> pupil, right eye white -> pupil }`.
pub fn build_rig(scene: &mut Scene, prefab: &Prefab, settings: &MascotSettings) -> (NodeHandle, MascotRig) {
    let group = scene.create_node_with_name("mascot");
    if let Some(node) = scene.get_node_mut(group) {
        node.transform.position = settings.position;
        node.transform.scale = Vec3::splat(settings.scale);
    }

    let model = scene.instantiate(prefab);
    scene.attach(model, group);

    let eyes = &settings.eyes;
    let white_geometry = Arc::new(create_sphere(&SphereOptions {
        radius: eyes.white_radius,
        width_segments: eyes.segments,
        height_segments: eyes.segments,
    }));
    let pupil_geometry = Arc::new(create_sphere(&SphereOptions {
        radius: eyes.pupil_radius,
        width_segments: eyes.segments,
        height_segments: eyes.segments,
    }));

    let add_eye = |scene: &mut Scene, side: &str, position: Vec3| -> NodeHandle {
        let mut white = Node::with_name(format!("{side}_eye_white"));
        white.transform.position = position;
        let white = scene.add_to_parent(white, group);
        scene.set_mesh(white, Mesh::new(white_geometry.clone(), Material::WHITE));

        let mut pupil = Node::with_name(format!("{side}_pupil"));
        pupil.transform.position = eyes.pupil_position;
        let pupil = scene.add_to_parent(pupil, white);
        scene.set_mesh(pupil, Mesh::new(pupil_geometry.clone(), Material::BLACK));
        pupil
    };

    let left_pupil = add_eye(scene, "left", eyes.left_position);
    let right_pupil = add_eye(scene, "right", eyes.right_position());

    (
        group,
        MascotRig {
            body: group,
            left_pupil,
            right_pupil,
        },
    )
}

/// Mascot component. Owns the state shared between its listener and its
/// frame callback.
pub struct MascotWithEyes {
    settings: MascotSettings,
    assets: AssetServer,
    ready: ReadySignal,
    input: Rc<RefCell<InputTracker>>,
    animator: Rc<RefCell<EyeTrackingAnimator>>,
}

impl MascotWithEyes {
    #[must_use]
    pub fn new(settings: MascotSettings, assets: AssetServer) -> Self {
        let animator = EyeTrackingAnimator::new(settings.pose, settings.smoothing);
        Self {
            settings,
            assets,
            ready: ReadySignal::new(),
            input: Rc::new(RefCell::new(InputTracker::new())),
            animator: Rc::new(RefCell::new(animator)),
        }
    }

    /// Handle onto the load state, for overlays.
    #[must_use]
    pub fn ready_signal(&self) -> ReadySignal {
        self.ready.clone()
    }

    #[must_use]
    pub fn settings(&self) -> &MascotSettings {
        &self.settings
    }

    #[must_use]
    pub fn key_state(&self) -> KeyState {
        self.input.borrow().snapshot()
    }

    #[must_use]
    pub fn smoothed_position(&self) -> Vec2 {
        self.animator.borrow().smoothed_position()
    }

    #[must_use]
    pub fn rig(&self) -> Option<MascotRig> {
        self.animator.borrow().rig().copied()
    }

    /// Starts loading the model and hooks the component into `viewport`.
    pub fn mount(&self, viewport: &mut Viewport) -> MountHandle {
        let pending = self.assets.load_prefab(&self.settings.model_path);
        self.mount_with(viewport, pending)
    }

    /// Like [`mount`](Self::mount) but with an already requested model.
    pub fn mount_with(&self, viewport: &mut Viewport, pending: PendingPrefab) -> MountHandle {
        self.input.borrow_mut().clear();
        self.animator.borrow_mut().reset();

        let input = self.input.clone();
        let key_listener = viewport.add_key_listener(move |event| {
            input.borrow_mut().apply(event);
        });

        let input = self.input.clone();
        let animator = self.animator.clone();
        let ready = self.ready.clone();
        let settings = self.settings.clone();
        let mut pending = Some(pending);

        let frame_callback = viewport.add_frame_callback(move |scene, frame| {
            if let Some(prefab) = pending.as_mut().and_then(PendingPrefab::poll) {
                pending = None;
                let (_, rig) = build_rig(scene, &prefab, &settings);
                animator.borrow_mut().set_rig(rig);
                ready.mark_ready();
            } else if pending.as_ref().is_some_and(PendingPrefab::is_finished) {
                // Failed load: keep animating without a rig, stay Loading
                pending = None;
            }

            let keys = input.borrow().snapshot();
            animator.borrow_mut().update(scene, &keys, frame.dt);
        });

        log::info!("Mascot mounted");
        MountHandle {
            key_listener,
            frame_callback,
            animator: self.animator.clone(),
        }
    }
}

/// Registration returned by [`MascotWithEyes::mount`].
///
/// Consumed by [`unmount`](Self::unmount), so teardown happens at most once.
#[must_use = "dropping the handle leaves the mascot mounted"]
pub struct MountHandle {
    key_listener: KeyListenerId,
    frame_callback: FrameCallbackId,
    animator: Rc<RefCell<EyeTrackingAnimator>>,
}

impl MountHandle {
    /// Removes the key listener and frame callback. Returns the mascot group
    /// node if the model had arrived, so the caller can remove it from the scene.
    pub fn unmount(self, viewport: &mut Viewport) -> Option<NodeHandle> {
        viewport.remove_key_listener(self.key_listener);
        viewport.remove_frame_callback(self.frame_callback);
        log::info!("Mascot unmounted");
        self.animator.borrow_mut().clear_rig().map(|rig| rig.body)
    }
}
