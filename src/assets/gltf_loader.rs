use std::path::Path;
use std::sync::Arc;

use glam::{Quat, Vec3, Vec4};

use crate::assets::prefab::{Prefab, PrefabNode};
use crate::errors::{AssetError, Result};
use crate::resources::geometry::Geometry;
use crate::resources::mesh::{Material, Mesh};
use crate::scene::transform::Transform;

/// glTF 2.0 loader producing a [`Prefab`].
///
/// Only what a solid-colour forward renderer needs is read: node hierarchy and
/// TRS, triangle positions / normals / indices and the base colour factor.
/// Textures, skins and animations are ignored.
pub struct GltfLoader;

impl GltfLoader {
    /// Loads a `.gltf` or `.glb` file. External buffers resolve relative to it.
    pub fn load(path: impl AsRef<Path>) -> Result<Prefab> {
        let path = path.as_ref();
        log::info!("Loading glTF: {}", path.display());
        let (document, buffers, _images) = gltf::import(path)?;
        Self::build(&document, &buffers)
    }

    /// Loads a self-contained glTF (GLB or embedded JSON) from memory.
    pub fn load_bytes(bytes: &[u8]) -> Result<Prefab> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;
        Self::build(&document, &buffers)
    }

    fn build(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<Prefab> {
        // glTF node index == prefab node index; extra primitive nodes are appended
        let mut nodes: Vec<PrefabNode> = document.nodes().map(|_| PrefabNode::new()).collect();
        let mut extra: Vec<PrefabNode> = Vec::new();

        for node in document.nodes() {
            let index = node.index();
            let (t, r, s) = node.transform().decomposed();

            let mut prefab_node = PrefabNode {
                name: node.name().map(str::to_owned),
                transform: Transform::from_trs(Vec3::from(t), Quat::from_array(r), Vec3::from(s)),
                children_indices: node.children().map(|c| c.index()).collect(),
                mesh: None,
            };

            if let Some(mesh) = node.mesh() {
                let mut primitives = Vec::new();
                for primitive in mesh.primitives() {
                    if let Some(m) = Self::load_primitive(&primitive, buffers)? {
                        primitives.push(m);
                    }
                }

                if primitives.len() == 1 {
                    prefab_node.mesh = primitives.pop();
                } else {
                    // Several primitives: one child node each
                    for (i, m) in primitives.into_iter().enumerate() {
                        let child_index = nodes.len() + extra.len();
                        extra.push(PrefabNode {
                            name: Some(format!("{}_primitive_{i}", mesh.name().unwrap_or("mesh"))),
                            mesh: Some(m),
                            ..PrefabNode::new()
                        });
                        prefab_node.children_indices.push(child_index);
                    }
                }
            }

            nodes[index] = prefab_node;
        }

        nodes.extend(extra);

        let root_indices: Vec<usize> = match document.default_scene().or_else(|| document.scenes().next()) {
            Some(scene) => scene.nodes().map(|n| n.index()).collect(),
            None => {
                // No scene: every node without a parent is a root
                let mut has_parent = vec![false; nodes.len()];
                for n in &nodes {
                    for &c in &n.children_indices {
                        if let Some(flag) = has_parent.get_mut(c) {
                            *flag = true;
                        }
                    }
                }
                (0..nodes.len()).filter(|&i| !has_parent[i]).collect()
            }
        };

        let prefab = Prefab { nodes, root_indices };
        log::debug!(
            "glTF built: {} nodes, {} meshes",
            prefab.nodes.len(),
            prefab.mesh_count()
        );
        Ok(prefab)
    }

    fn load_primitive(
        primitive: &gltf::Primitive,
        buffers: &[gltf::buffer::Data],
    ) -> Result<Option<Mesh>> {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("Skipping non-triangle primitive ({:?})", primitive.mode());
            return Ok(None);
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| AssetError::InvalidData("primitive has no POSITION attribute".into()))?
            .collect();
        let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(Iterator::collect);
        let indices: Option<Vec<u32>> = reader.read_indices().map(|i| i.into_u32().collect());

        if let Some(indices) = &indices
            && indices.iter().any(|&i| i as usize >= positions.len())
        {
            return Err(AssetError::InvalidData("index out of range".into()).into());
        }

        let color = primitive.material().pbr_metallic_roughness().base_color_factor();
        let geometry = Geometry::new(positions, normals, indices);

        Ok(Some(Mesh::new(
            Arc::new(geometry),
            Material::new(Vec4::from_array(color)),
        )))
    }
}
