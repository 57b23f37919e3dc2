//! Scene graph
//!
//! - [`Node`]: hierarchy links plus a [`Transform`]
//! - [`Transform`]: position / rotation / scale with cached matrices
//! - [`Scene`]: node storage, component tables and matrix propagation
//! - [`Camera`], [`Light`]: components the renderer reads

pub mod camera;
pub mod light;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use light::{Light, LightKind};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a [`Scene`].
    pub struct NodeHandle;
}
