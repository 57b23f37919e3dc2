//! Model loading: glTF to [`Prefab`], plus a shared background-loading cache.

pub mod gltf_loader;
pub mod prefab;
pub mod server;

pub use gltf_loader::GltfLoader;
pub use prefab::{Prefab, PrefabNode, SharedPrefab};
pub use server::{AssetServer, PendingPrefab};
