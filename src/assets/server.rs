use std::path::{Path, PathBuf};
use std::sync::Arc;

use flume::{Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::assets::gltf_loader::GltfLoader;
use crate::assets::prefab::SharedPrefab;
use crate::errors::{AssetError, Result};

enum PrefabSlot {
    /// Load in flight; every waiter gets the result once.
    Loading(Vec<Sender<SharedPrefab>>),
    Ready(SharedPrefab),
}

/// Shared model cache.
///
/// Cheap to clone: all clones see the same cache. Loads run on a background
/// thread and results are delivered over a channel, so the frame loop never
/// blocks on file I/O.
#[derive(Clone, Default)]
pub struct AssetServer {
    prefabs: Arc<Mutex<FxHashMap<PathBuf, PrefabSlot>>>,
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a model. A cached or in-flight load is reused.
    pub fn load_prefab(&self, path: impl AsRef<Path>) -> PendingPrefab {
        let path = path.as_ref().to_path_buf();
        let (tx, rx) = flume::bounded(1);

        let mut prefabs = self.prefabs.lock();
        match prefabs.get_mut(&path) {
            Some(PrefabSlot::Ready(prefab)) => {
                let _ = tx.send(prefab.clone());
            }
            Some(PrefabSlot::Loading(waiters)) => waiters.push(tx),
            None => {
                prefabs.insert(path.clone(), PrefabSlot::Loading(vec![tx]));
                drop(prefabs);
                self.spawn_load(path.clone());
            }
        }

        PendingPrefab {
            path,
            rx,
            finished: false,
        }
    }

    /// Warms the cache without keeping a handle to the result.
    pub fn preload(&self, path: impl AsRef<Path>) {
        let _ = self.load_prefab(path);
    }

    /// Returns the cached prefab if its load already finished.
    #[must_use]
    pub fn get_prefab(&self, path: impl AsRef<Path>) -> Option<SharedPrefab> {
        match self.prefabs.lock().get(path.as_ref()) {
            Some(PrefabSlot::Ready(prefab)) => Some(prefab.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.prefabs.lock().get(path.as_ref()), Some(PrefabSlot::Loading(_)))
    }

    fn spawn_load(&self, path: PathBuf) {
        let prefabs = self.prefabs.clone();
        let worker_path = path.clone();

        let spawned = std::thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                let result = GltfLoader::load(&worker_path).map(Arc::new);
                Self::finish(&prefabs, &worker_path, result);
            });

        if let Err(e) = spawned {
            Self::finish(&self.prefabs, &path, Err(AssetError::Io(e).into()));
        }
    }

    fn finish(
        prefabs: &Mutex<FxHashMap<PathBuf, PrefabSlot>>,
        path: &Path,
        result: Result<SharedPrefab>,
    ) {
        let mut prefabs = prefabs.lock();
        match result {
            Ok(prefab) => {
                log::info!("Model loaded: {}", path.display());
                let previous = prefabs.insert(path.to_path_buf(), PrefabSlot::Ready(prefab.clone()));
                if let Some(PrefabSlot::Loading(waiters)) = previous {
                    for tx in waiters {
                        // A dropped receiver just means nobody is waiting any more
                        let _ = tx.send(prefab.clone());
                    }
                }
            }
            Err(e) => {
                // Waiters see a disconnected channel; a later request retries
                log::error!("Failed to load model {}: {e}", path.display());
                prefabs.remove(path);
            }
        }
    }
}

/// One-shot receiver for a model requested from an [`AssetServer`].
pub struct PendingPrefab {
    path: PathBuf,
    rx: Receiver<SharedPrefab>,
    finished: bool,
}

impl PendingPrefab {
    /// Non-blocking. Yields the prefab at most once; after a failed load it
    /// never yields.
    pub fn poll(&mut self) -> Option<SharedPrefab> {
        if self.finished {
            return None;
        }
        match self.rx.try_recv() {
            Ok(prefab) => {
                self.finished = true;
                Some(prefab)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::debug!("Model load for {} ended without a result", self.path.display());
                self.finished = true;
                None
            }
        }
    }

    /// Blocks until the load completes.
    pub fn wait(mut self) -> Result<SharedPrefab> {
        if self.finished {
            return Err(AssetError::Disconnected(self.path.display().to_string()).into());
        }
        self.finished = true;
        self.rx
            .recv()
            .map_err(|_| AssetError::Disconnected(self.path.display().to_string()).into())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
