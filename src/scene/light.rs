use glam::Vec3;

/// Light flavours the forward renderer understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction; position is ignored.
    Ambient,
    /// Parallel light travelling from the node's world position towards
    /// `target` (world space).
    Directional { target: Vec3 },
}

/// Light component attached to a scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_ambient(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Ambient,
        }
    }

    /// Directional light aimed at the world origin.
    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional { target: Vec3::ZERO },
        }
    }

    /// Radiance contribution (colour scaled by intensity).
    #[must_use]
    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}
