//! # Mascot
//!
//! An interactive 3D mascot whose eyes follow the arrow keys.
//!
//! The crate is layered bottom-up:
//!
//! - [`input`]: held arrow-key state
//! - [`animation`]: smoothing and pose mapping, the per-frame core
//! - [`scene`], [`resources`]: a small scene graph with solid-colour meshes
//! - [`assets`]: glTF loading with a shared background cache
//! - [`mascot`]: the mascot component and its load-ready signal
//! - [`app`], [`render`]: winit window loop and wgpu forward renderer

pub mod animation;
pub mod app;
pub mod assets;
pub mod errors;
pub mod input;
pub mod mascot;
pub mod render;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{EyeTrackingAnimator, MascotRig, PoseSettings, PoseSmoother, SmoothingSettings};
pub use app::viewport::{FrameState, Viewport};
pub use app::{App, AppSettings};
pub use assets::{AssetServer, GltfLoader, PendingPrefab, Prefab};
pub use errors::{Error, Result};
pub use input::{ButtonState, InputTracker, Key, KeyEvent, KeyState};
pub use mascot::{LoadState, MascotSettings, MascotWithEyes, MountHandle, ReadySignal};
pub use render::{RenderSettings, Renderer};
pub use resources::{Geometry, Material, Mesh, SphereOptions, create_sphere};
pub use scene::{Camera, Light, Node, NodeHandle, Scene, Transform};
