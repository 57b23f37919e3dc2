use std::sync::Arc;

use glam::Vec4;

use crate::resources::geometry::Geometry;

/// Solid-colour surface description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGBA base colour.
    pub color: Vec4,
}

impl Material {
    pub const WHITE: Material = Material { color: Vec4::ONE };
    pub const BLACK: Material = Material {
        color: Vec4::new(0.0, 0.0, 0.0, 1.0),
    };

    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mesh component: shared geometry plus a material.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Arc<Geometry>,
    pub material: Material,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: Arc<Geometry>, material: Material) -> Self {
        Self { geometry, material }
    }
}
