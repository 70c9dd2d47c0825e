#![forbid(unsafe_code)]

//! Insertion-ordered camera registry.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    camera::Camera,
    error::{CameraError, CameraResult},
};

/// A registered camera plus its operation lock.
///
/// The lock serializes session operations against the same camera; operations
/// on different cameras proceed concurrently.
pub(crate) struct CameraEntry {
    pub(crate) camera: Camera,
    pub(crate) op_lock: Mutex<()>,
}

/// Name-unique camera registry preserving registration order.
pub(crate) struct Registry {
    cameras: RwLock<Vec<Arc<CameraEntry>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            cameras: RwLock::new(Vec::new()),
        }
    }

    pub(crate) async fn contains(&self, name: &str) -> bool {
        self.cameras
            .read()
            .await
            .iter()
            .any(|entry| entry.camera.name == name)
    }

    /// Insert a camera, re-checking name uniqueness under the write lock.
    ///
    /// Device resolution happens before this call without any lock held, so a
    /// concurrent registration may have won the race in the meantime.
    pub(crate) async fn insert(&self, camera: Camera) -> CameraResult<()> {
        let mut cameras = self.cameras.write().await;
        if cameras.iter().any(|entry| entry.camera.name == camera.name) {
            return Err(CameraError::DuplicateName(camera.name));
        }
        cameras.push(Arc::new(CameraEntry {
            camera,
            op_lock: Mutex::new(()),
        }));
        Ok(())
    }

    pub(crate) async fn entry(&self, name: &str) -> Option<Arc<CameraEntry>> {
        self.cameras
            .read()
            .await
            .iter()
            .find(|entry| entry.camera.name == name)
            .cloned()
    }

    pub(crate) async fn find(&self, name: &str) -> Option<Camera> {
        self.entry(name).await.map(|entry| entry.camera.clone())
    }

    /// Snapshot of all cameras in registration order.
    pub(crate) async fn list(&self) -> Vec<Camera> {
        self.cameras
            .read()
            .await
            .iter()
            .map(|entry| entry.camera.clone())
            .collect()
    }
}
