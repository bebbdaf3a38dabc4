//=========================================================================
// Asset Manager
//=========================================================================
//
// Mutex-guarded image registry filled by worker threads.
//
// Every registry read and write goes through the lock. The completion
// callback is taken out of the registry and invoked after the guard is
// dropped, so it may request further loads.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::AssetError;
use crate::core::render::Image;

//=== Types ===============================================================

/// Invoked once when every requested load of a batch has finished.
pub type LoadComplete = Box<dyn FnOnce() + Send + 'static>;

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct Registry {
    images: HashMap<String, Image>,
    pending: Vec<(String, PathBuf)>,
    total: usize,
    finished: usize,
    loading: bool,
    on_complete: Option<LoadComplete>,
}

//=== AssetManager ========================================================

/// Cheaply cloneable handle to the shared registry.
#[derive(Clone, Default)]
pub struct AssetManager {
    registry: Arc<Mutex<Registry>>,
}

impl AssetManager {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Loading ----------------------------------------------------------

    /// Queues an image load.
    ///
    /// Before [`start_loading`](Self::start_loading) the request waits in
    /// the queue; while a batch is running it starts immediately.
    pub fn request_load(&self, id: impl Into<String>, path: impl Into<PathBuf>) -> Result<(), AssetError> {
        let (id, path) = (id.into(), path.into());

        let start_now = {
            let mut registry = self.lock()?;
            registry.total += 1;
            if registry.loading {
                true
            } else {
                registry.pending.push((id.clone(), path.clone()));
                false
            }
        };

        if start_now {
            self.spawn_worker(id, path)?;
        }
        Ok(())
    }

    /// Starts every queued load; `on_complete` runs once all have finished.
    ///
    /// With nothing outstanding the callback runs immediately.
    pub fn start_loading(&self, on_complete: LoadComplete) -> Result<(), AssetError> {
        let outcome = {
            let mut registry = self.lock()?;
            if registry.finished >= registry.total {
                Err(on_complete)
            } else {
                registry.loading = true;
                registry.on_complete = Some(on_complete);
                Ok(std::mem::take(&mut registry.pending))
            }
        };

        let pending = match outcome {
            Ok(pending) => pending,
            Err(on_complete) => {
                debug!(target: "assets", "Nothing to load, completing immediately");
                on_complete();
                return Ok(());
            }
        };

        info!(target: "assets", "Loading {} asset(s)", pending.len());
        let mut first_error = None;
        for (id, path) in pending {
            if let Err(e) = self.spawn_worker(id, path) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    //--- Queries ----------------------------------------------------------

    /// Fraction of requested loads that have finished, 1.0 if none.
    pub fn progress(&self) -> Result<f32, AssetError> {
        let registry = self.lock()?;
        if registry.total == 0 {
            return Ok(1.0);
        }
        Ok(registry.finished as f32 / registry.total as f32)
    }

    pub fn is_complete(&self) -> Result<bool, AssetError> {
        let registry = self.lock()?;
        Ok(registry.finished >= registry.total)
    }

    /// The loaded image, or `None` if it is not ready (or failed).
    pub fn get(&self, id: &str) -> Result<Option<Image>, AssetError> {
        let registry = self.lock()?;
        Ok(registry.images.get(id).cloned())
    }

    //--- Internal Helpers -------------------------------------------------

    fn lock(&self) -> Result<MutexGuard<'_, Registry>, AssetError> {
        self.registry.lock().map_err(|_| AssetError::RegistryPoisoned)
    }

    fn spawn_worker(&self, id: String, path: PathBuf) -> Result<(), AssetError> {
        self.spawn_with(id, path, |name, job| thread::Builder::new().name(name).spawn(job).map(|_| ()))
    }

    /// Hands the load to `spawn`. A load that never starts still counts
    /// as finished so the batch can complete.
    fn spawn_with<S>(&self, id: String, path: PathBuf, spawn: S) -> Result<(), AssetError>
    where
        S: FnOnce(String, Job) -> io::Result<()>,
    {
        let registry = Arc::clone(&self.registry);
        let name = format!("asset-{id}");
        let job_id = id.clone();

        let job: Job = Box::new(move || {
            let decoded = decode_image(&path);
            finish_load(&registry, job_id, &path, decoded);
        });

        spawn(name, job).map_err(|e| {
            warn!(target: "assets", "No worker for {}: {}", id, e);
            record_finished(&self.registry, id, None);
            AssetError::WorkerSpawn(e)
        })
    }
}

//=== Worker ==============================================================

fn decode_image(path: &Path) -> Result<Image, image::ImageError> {
    let image = image::open(path)?.to_rgba8();
    Ok(Arc::new(image))
}

fn finish_load(
    registry: &Mutex<Registry>,
    id: String,
    path: &Path,
    decoded: Result<Image, image::ImageError>,
) {
    let image = match decoded {
        Ok(image) => {
            debug!(
                target: "assets",
                "Loaded {} ({}x{}) from {}",
                id,
                image.width(),
                image.height(),
                path.display()
            );
            Some(image)
        }
        Err(e) => {
            warn!(target: "assets", "Failed to load {} from {}: {}", id, path.display(), e);
            None
        }
    };
    record_finished(registry, id, image);
}

/// Counts one load as done and fires the batch callback on the last one.
fn record_finished(registry: &Mutex<Registry>, id: String, image: Option<Image>) {
    let callback = {
        let Ok(mut registry) = registry.lock() else {
            warn!(target: "assets", "Registry poisoned, dropping {}", id);
            return;
        };

        if let Some(image) = image {
            registry.images.insert(id, image);
        }

        registry.finished += 1;
        if registry.loading && registry.finished >= registry.total {
            registry.loading = false;
            registry.on_complete.take()
        } else {
            None
        }
    };

    if let Some(callback) = callback {
        info!(target: "assets", "All assets loaded");
        callback();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use image::{Rgba, RgbaImage};
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn progress_is_complete_when_nothing_requested() {
        let assets = AssetManager::new();
        assert_eq!(assets.progress().unwrap(), 1.0);
        assert!(assets.is_complete().unwrap());
        assert!(assets.get("missing").unwrap().is_none());
    }

    #[test]
    fn queued_requests_wait_for_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 2, 2);
        let assets = AssetManager::new();

        assets.request_load("a", path).unwrap();

        assert_eq!(assets.progress().unwrap(), 0.0);
        assert!(!assets.is_complete().unwrap());
    }

    #[test]
    fn batch_loads_images_and_fires_callback_once() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetManager::new();
        assets.request_load("a", write_png(dir.path(), "a.png", 4, 3)).unwrap();
        assets.request_load("b", write_png(dir.path(), "b.png", 1, 1)).unwrap();

        let (tx, rx) = bounded(4);
        assets
            .start_loading(Box::new(move || tx.send(()).unwrap()))
            .unwrap();

        rx.recv_timeout(TIMEOUT).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        assert_eq!(assets.progress().unwrap(), 1.0);
        let a = assets.get("a").unwrap().unwrap();
        assert_eq!(a.dimensions(), (4, 3));
        assert!(assets.get("b").unwrap().is_some());
    }

    #[test]
    fn failed_load_still_counts_as_finished() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetManager::new();
        assets.request_load("ghost", dir.path().join("nope.png")).unwrap();

        let (tx, rx) = bounded(1);
        assets
            .start_loading(Box::new(move || tx.send(()).unwrap()))
            .unwrap();

        rx.recv_timeout(TIMEOUT).unwrap();
        assert!(assets.is_complete().unwrap());
        assert!(assets.get("ghost").unwrap().is_none());
    }

    #[test]
    fn empty_batch_completes_immediately() {
        let assets = AssetManager::new();
        let (tx, rx) = bounded(1);

        assets
            .start_loading(Box::new(move || tx.send(()).unwrap()))
            .unwrap();

        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn failed_worker_spawn_still_completes_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 1, 1);
        let assets = AssetManager::new();
        assets.request_load("a", path.clone()).unwrap();

        let (tx, rx) = bounded(1);
        {
            let mut registry = assets.lock().unwrap();
            registry.pending.clear();
            registry.loading = true;
            registry.on_complete = Some(Box::new(move || tx.send(()).unwrap()));
        }

        let err = assets
            .spawn_with("a".to_string(), path, |_, _| Err(io::Error::other("no threads left")))
            .unwrap_err();

        assert!(matches!(err, AssetError::WorkerSpawn(_)));
        assert_eq!(assets.progress().unwrap(), 1.0);
        assert!(rx.try_recv().is_ok());
        assert!(assets.get("a").unwrap().is_none());
    }

    #[test]
    fn callback_may_request_more_loads() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_png(dir.path(), "first.png", 1, 1);
        let second = write_png(dir.path(), "second.png", 1, 1);

        let assets = AssetManager::new();
        assets.request_load("first", first).unwrap();

        let (tx, rx) = bounded(1);
        let handle = assets.clone();
        assets
            .start_loading(Box::new(move || {
                // Re-entering the registry here must not deadlock
                let queued = handle.request_load("second", second).is_ok();
                tx.send(queued).unwrap();
            }))
            .unwrap();

        assert!(rx.recv_timeout(TIMEOUT).unwrap());
    }
}
