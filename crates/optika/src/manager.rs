#![forbid(unsafe_code)]

use std::sync::Arc;

use optika_provider::{
    ConnectivityStatus, DeviceIdentifier, HttpProvider, Location, NetworkProvider, ProviderExt,
};
use optika_qos::Codec;
use tracing::{debug, info};
use url::Url;

use crate::{
    camera::Camera,
    config::ManagerConfig,
    error::{CameraError, CameraResult},
    registry::Registry,
};

/// Facade over the camera registry and network QoS session orchestration.
///
/// The manager owns no background tasks; every method is a plain async call
/// driven by the caller. It is cheap to share behind an `Arc` and all methods
/// take `&self`.
pub struct CameraManager {
    pub(crate) provider: Arc<dyn NetworkProvider>,
    pub(crate) registry: Registry,
    pub(crate) config: ManagerConfig,
}

impl CameraManager {
    /// Create a manager over an arbitrary provider implementation.
    pub fn new(provider: Arc<dyn NetworkProvider>, config: ManagerConfig) -> Self {
        Self {
            provider,
            registry: Registry::new(),
            config,
        }
    }

    /// Create a manager over an HTTP provider with retry and timeout layers
    /// derived from the config's [`ProviderOptions`](optika_provider::ProviderOptions).
    pub fn connect(base_url: Url, api_key: impl Into<String>, config: ManagerConfig) -> Self {
        let options = config.provider.clone();
        let provider = HttpProvider::new(base_url, options.clone())
            .with_api_key(api_key)
            .with_retry(options.retry_policy.clone())
            .with_timeout(options.overall_timeout());
        Self::new(Arc::new(provider), config)
    }

    /// Register a camera, resolving its network device with the provider.
    ///
    /// The identifier is resolved without holding any registry lock; name
    /// uniqueness is re-checked on insert, and a failed resolution leaves the
    /// registry untouched.
    pub async fn add_camera(
        &self,
        name: &str,
        description: &str,
        codec: Codec,
        identifier: &DeviceIdentifier,
    ) -> CameraResult<()> {
        if name.trim().is_empty() {
            return Err(CameraError::InvalidName(name.to_string()));
        }
        if self.registry.contains(name).await {
            return Err(CameraError::DuplicateName(name.to_string()));
        }

        debug!(camera = %name, "optika resolving camera device");
        let device = self
            .provider
            .resolve_device(identifier)
            .await
            .map_err(|source| CameraError::DeviceResolutionFailed {
                name: name.to_string(),
                source,
            })?;

        self.registry
            .insert(Camera::new(name, description, codec, device.clone()))
            .await?;
        info!(camera = %name, device = %device, "optika camera registered");
        Ok(())
    }

    /// Look up a registered camera by name.
    pub async fn find_camera(&self, name: &str) -> Option<Camera> {
        self.registry.find(name).await
    }

    /// All registered cameras, in registration order.
    pub async fn list_cameras(&self) -> Vec<Camera> {
        self.registry.list().await
    }

    /// Last-known location of the camera's device, no staler than the
    /// configured `location_max_age`.
    pub async fn camera_location(&self, name: &str) -> CameraResult<Location> {
        let entry = self.entry(name).await?;
        let location = self
            .provider
            .device_location(&entry.camera.device, self.config.location_max_age)
            .await?;
        Ok(location)
    }

    /// Live connectivity state of the camera's device.
    ///
    /// Purely a query; the advisory status flags on the camera record are not
    /// touched.
    pub async fn camera_status(&self, name: &str) -> CameraResult<ConnectivityStatus> {
        let entry = self.entry(name).await?;
        let status = self.provider.device_connectivity(&entry.camera.device).await?;
        Ok(status)
    }

    pub(crate) async fn entry(&self, name: &str) -> CameraResult<Arc<crate::registry::CameraEntry>> {
        self.registry
            .entry(name)
            .await
            .ok_or_else(|| CameraError::CameraNotFound(name.to_string()))
    }
}
