use std::sync::Arc;

use crate::resources::mesh::Mesh;
use crate::scene::transform::Transform;

/// Prefab node: plain data, children referenced by index.
#[derive(Debug, Clone)]
pub struct PrefabNode {
    pub name: Option<String>,
    pub transform: Transform,
    /// Indices into `Prefab::nodes`.
    pub children_indices: Vec<usize>,
    pub mesh: Option<Mesh>,
}

impl PrefabNode {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            transform: Transform::new(),
            children_indices: Vec::new(),
            mesh: None,
        }
    }
}

impl Default for PrefabNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Intermediate scene description produced by a loader.
///
/// A prefab holds no `NodeHandle` or scene reference, so it can be built on a
/// worker thread and shared freely. Use [`Scene::instantiate`] to turn it into
/// live nodes.
///
/// [`Scene::instantiate`]: crate::scene::Scene::instantiate
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    pub nodes: Vec<PrefabNode>,
    pub root_indices: Vec<usize>,
}

impl Prefab {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.mesh.is_some()).count()
    }
}

pub type SharedPrefab = Arc<Prefab>;
