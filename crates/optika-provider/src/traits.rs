use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::ProviderResult,
    retry::RetryProvider,
    timeout::TimeoutProvider,
    types::{
        ConnectivityStatus, DeviceHandle, DeviceIdentifier, Location, RetryPolicy, SessionHandle,
        SessionId, SessionRequest,
    },
};

/// Interface to the external network-capability provider.
///
/// Implementations are shared read-only after construction; all mutability is
/// provider-side. Sessions are never cached by callers of this trait — every
/// query goes back to the provider.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Resolve a device identifier to the provider's device handle.
    async fn resolve_device(&self, identifier: &DeviceIdentifier) -> ProviderResult<DeviceHandle>;

    /// Last-known device location no older than `max_age`.
    async fn device_location(
        &self,
        device: &DeviceHandle,
        max_age: Duration,
    ) -> ProviderResult<Location>;

    /// Live connectivity state of the device.
    async fn device_connectivity(
        &self,
        device: &DeviceHandle,
    ) -> ProviderResult<ConnectivityStatus>;

    /// Create a QoS session for the device.
    async fn create_session(
        &self,
        device: &DeviceHandle,
        request: &SessionRequest,
    ) -> ProviderResult<SessionHandle>;

    /// All outstanding sessions for the device.
    async fn list_sessions(&self, device: &DeviceHandle) -> ProviderResult<Vec<SessionHandle>>;

    /// Extend a session by `additional` (additive to the remaining duration).
    async fn extend_session(&self, session: &SessionId, additional: Duration)
        -> ProviderResult<()>;

    /// Delete a single session.
    async fn delete_session(&self, session: &SessionId) -> ProviderResult<()>;

    /// Delete every outstanding session for the device.
    async fn clear_sessions(&self, device: &DeviceHandle) -> ProviderResult<()>;
}

pub trait ProviderExt: NetworkProvider + Sized {
    /// Add a timeout layer bounding every provider call.
    fn with_timeout(self, timeout: Duration) -> TimeoutProvider<Self> {
        TimeoutProvider::new(self, timeout)
    }

    /// Add a retry layer with exponential backoff.
    fn with_retry(self, policy: RetryPolicy) -> RetryProvider<Self> {
        RetryProvider::new(self, policy)
    }
}

impl<T: NetworkProvider> ProviderExt for T {}
