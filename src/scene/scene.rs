use std::sync::atomic::{AtomicU32, Ordering};

use glam::Affine3A;
use slotmap::{SlotMap, SparseSecondaryMap};

use crate::assets::prefab::Prefab;
use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::Node;

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph container.
///
/// Nodes live in a slot map so handles stay valid (or detectably stale) across
/// removals. Components are stored in sparse side tables keyed by the owning
/// node handle.
pub struct Scene {
    pub id: u32,

    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub meshes: SparseSecondaryMap<NodeHandle, Mesh>,
    pub lights: SparseSecondaryMap<NodeHandle, Light>,

    pub camera: Camera,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SparseSecondaryMap::new(),
            lights: SparseSecondaryMap::new(),
            camera: Camera::default(),
        }
    }

    // ========================================================================
    // Node lifecycle
    // ========================================================================

    /// Creates an empty node at the root.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::with_name(name))
    }

    /// Inserts a node at the root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Inserts a node directly under `parent`. Falls back to the root when the
    /// parent does not exist.
    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("add_to_parent: parent node not found, inserting at root");
            return self.add_node(child);
        }

        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    /// Removes a node, its subtree and every component attached to them.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };

        match node.parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|&c| c != handle);
                }
            }
            None => self.root_nodes.retain(|&r| r != handle),
        }

        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            if let Some(removed) = self.nodes.remove(current) {
                stack.extend(removed.children);
            }
            self.meshes.remove(current);
            self.lights.remove(current);
        }
    }

    /// Re-parents `child` under `parent`, detaching it from its previous parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::warn!("attach: node not found");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("attach: would create a cycle");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        match old_parent {
            Some(p) => {
                if let Some(n) = self.nodes.get_mut(p) {
                    n.children.retain(|&c| c != child);
                }
            }
            None => self.root_nodes.retain(|&r| r != child),
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// True if `ancestor` appears on the parent chain of `node` (or is `node`).
    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(h) = current {
            if h == ancestor {
                return true;
            }
            current = self.nodes.get(h).and_then(|n| n.parent);
        }
        false
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle)?.name.as_deref()
    }

    /// Depth-first search for the first node with the given name.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();
        while let Some(h) = stack.pop() {
            let node = self.nodes.get(h)?;
            if node.name.as_deref() == Some(name) {
                return Some(h);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn set_mesh(&mut self, handle: NodeHandle, mesh: Mesh) {
        if self.nodes.contains_key(handle) {
            self.meshes.insert(handle, mesh);
        }
    }

    /// Creates a root node carrying `mesh`.
    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let handle = self.create_node();
        self.meshes.insert(handle, mesh);
        handle
    }

    /// Creates a root node carrying `light`.
    pub fn add_light(&mut self, light: Light) -> NodeHandle {
        let handle = self.create_node();
        self.lights.insert(handle, light);
        handle
    }

    /// Visible meshes with their world matrices.
    pub fn iter_meshes(&self) -> impl Iterator<Item = (&Mesh, &Affine3A)> {
        self.meshes.iter().filter_map(move |(handle, mesh)| {
            let node = self.nodes.get(handle)?;
            self.is_visible(handle).then_some((mesh, &node.transform.world_matrix))
        })
    }

    /// Lights with their world matrices.
    pub fn iter_lights(&self) -> impl Iterator<Item = (&Light, &Affine3A)> {
        self.lights.iter().filter_map(move |(handle, light)| {
            let node = self.nodes.get(handle)?;
            Some((light, &node.transform.world_matrix))
        })
    }

    /// A node is visible only if it and every ancestor are visible.
    #[must_use]
    pub fn is_visible(&self, handle: NodeHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            match self.nodes.get(h) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    // ========================================================================
    // Prefab instantiation
    // ========================================================================

    /// Instantiates a prefab under a fresh root group and returns the group.
    pub fn instantiate(&mut self, prefab: &Prefab) -> NodeHandle {
        let group = self.create_node_with_name("prefab");
        let mut handles: Vec<Option<NodeHandle>> = vec![None; prefab.nodes.len()];

        // Parents first: walk from each root, creating children as we go
        let mut stack: Vec<(usize, NodeHandle)> =
            prefab.root_indices.iter().rev().map(|&i| (i, group)).collect();

        while let Some((index, parent)) = stack.pop() {
            let Some(source) = prefab.nodes.get(index) else {
                log::warn!("Prefab node index {index} out of bounds");
                continue;
            };
            if handles[index].is_some() {
                continue;
            }

            let mut node = Node::new();
            node.name.clone_from(&source.name);
            node.transform = source.transform.clone();
            node.transform.mark_dirty();

            let handle = self.add_to_parent(node, parent);
            if let Some(mesh) = &source.mesh {
                self.meshes.insert(handle, mesh.clone());
            }
            handles[index] = Some(handle);

            for &child in source.children_indices.iter().rev() {
                stack.push((child, handle));
            }
        }

        group
    }

    // ========================================================================
    // Matrix update
    // ========================================================================

    /// Recomputes local and world matrices for the whole graph.
    ///
    /// Iterative so deep hierarchies cannot overflow the stack. A subtree is
    /// only rebuilt below a node whose local matrix (or any ancestor's) changed.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A, bool)> = self
            .root_nodes
            .iter()
            .rev()
            .map(|&h| (h, Affine3A::IDENTITY, false))
            .collect();

        while let Some((handle, parent_world, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };

            let local_changed = node.transform.update_local_matrix();
            let changed = local_changed || parent_changed;
            if changed {
                let world = parent_world * node.transform.local_matrix;
                node.transform.set_world_matrix(world);
            }

            let world = node.transform.world_matrix;
            for &child in node.children.iter().rev() {
                stack.push((child, world, changed));
            }
        }
    }
}
