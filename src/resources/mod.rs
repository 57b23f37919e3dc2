//! CPU-side resource definitions: geometry, materials, meshes and primitives.

pub mod geometry;
pub mod mesh;
pub mod primitives;

pub use geometry::{Geometry, Vertex};
pub use mesh::{Material, Mesh};
pub use primitives::{SphereOptions, create_sphere};
