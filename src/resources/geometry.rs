use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;

static NEXT_GEOMETRY_ID: AtomicU64 = AtomicU64::new(1);

/// Indexed triangle geometry with per-vertex normals.
///
/// Geometry is immutable once built and shared through `Arc`. The `id` is unique
/// per process and is what the renderer keys its GPU buffers on.
#[derive(Debug, Clone)]
pub struct Geometry {
    id: u64,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Builds geometry from raw arrays.
    ///
    /// Missing or mismatched normals are recomputed from the triangles; missing
    /// indices are generated as a plain triangle list.
    #[must_use]
    pub fn new(positions: Vec<[f32; 3]>, normals: Option<Vec<[f32; 3]>>, indices: Option<Vec<u32>>) -> Self {
        let indices = indices.unwrap_or_else(|| (0..positions.len() as u32).collect());
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => compute_vertex_normals(&positions, &indices),
        };

        Self {
            id: NEXT_GEOMETRY_ID.fetch_add(1, Ordering::Relaxed),
            positions,
            normals,
            indices,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Interleaves position and normal into a single vertex stream.
    #[must_use]
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(&position, &normal)| Vertex { position, normal })
            .collect()
    }
}

/// GPU vertex layout shared by every mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Area-weighted vertex normals. Out-of-range indices are skipped.
fn compute_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from(positions[a]);
        let pb = Vec3::from(positions[b]);
        let pc = Vec3::from(positions[c]);
        let face = (pb - pa).cross(pc - pa);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    accum
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_indices_and_normals() {
        let geo = Geometry::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            None,
        );
        assert_eq!(geo.indices, vec![0, 1, 2]);
        for n in &geo.normals {
            assert!((Vec3::from(*n) - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn ids_are_unique() {
        let a = Geometry::new(vec![[0.0; 3]], None, None);
        let b = Geometry::new(vec![[0.0; 3]], None, None);
        assert_ne!(a.id(), b.id());
    }
}
