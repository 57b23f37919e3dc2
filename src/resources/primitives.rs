use std::f32::consts::PI;

use crate::resources::geometry::Geometry;

pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
        }
    }
}

impl SphereOptions {
    #[must_use]
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }
}

/// UV sphere centred on the origin, Y-up.
pub fn create_sphere(options: &SphereOptions) -> Geometry {
    let radius = options.radius;
    let width_segments = options.width_segments.max(3);
    let height_segments = options.height_segments.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for y in 0..=height_segments {
        let v_ratio = y as f32 / height_segments as f32;
        // Latitude: 0 at the south pole, PI at the north pole
        let theta = v_ratio * PI;

        let py = -radius * theta.cos();
        let ring_radius = radius * theta.sin();

        for x in 0..=width_segments {
            let u_ratio = x as f32 / width_segments as f32;
            let phi = u_ratio * 2.0 * PI;

            let px = -ring_radius * phi.cos();
            let pz = ring_radius * phi.sin();

            positions.push([px, py, pz]);

            let (nx, ny, nz) = if radius.abs() > f32::EPSILON {
                (px / radius, py / radius, pz / radius)
            } else {
                (0.0, 1.0, 0.0)
            };
            normals.push([nx, ny, nz]);
        }
    }

    let stride = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let v0 = y * stride + x;
            let v1 = v0 + 1;
            let v2 = (y + 1) * stride + x;
            let v3 = v2 + 1;

            // Degenerate triangles at the poles are harmless and dropped by the rasterizer
            indices.extend_from_slice(&[v0, v1, v2]);
            indices.extend_from_slice(&[v1, v3, v2]);
        }
    }

    Geometry::new(positions, Some(normals), Some(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let geo = create_sphere(&SphereOptions::with_radius(0.12));
        for p in &geo.positions {
            assert!((Vec3::from(*p).length() - 0.12).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_counts_follow_segments() {
        let geo = create_sphere(&SphereOptions {
            radius: 1.0,
            width_segments: 8,
            height_segments: 4,
        });
        assert_eq!(geo.vertex_count(), 9 * 5);
        assert_eq!(geo.index_count(), 8 * 4 * 6);
    }

    #[test]
    fn sphere_segments_are_clamped() {
        let geo = create_sphere(&SphereOptions {
            radius: 1.0,
            width_segments: 1,
            height_segments: 1,
        });
        assert_eq!(geo.vertex_count(), 4 * 3);
    }
}
