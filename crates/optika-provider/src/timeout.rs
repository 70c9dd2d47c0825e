use std::time::Duration;

use async_trait::async_trait;

use crate::{
    error::{ProviderError, ProviderResult},
    traits::NetworkProvider,
    types::{
        ConnectivityStatus, DeviceHandle, DeviceIdentifier, Location, SessionHandle, SessionId,
        SessionRequest,
    },
};

/// Timeout decorator for [`NetworkProvider`] implementations.
///
/// Bounds every provider call; expiry yields [`ProviderError::Timeout`]
/// instead of hanging the caller indefinitely.
pub struct TimeoutProvider<P> {
    inner: P,
    timeout: Duration,
}

impl<P: NetworkProvider> TimeoutProvider<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = ProviderResult<T>> + Send,
    ) -> ProviderResult<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| ProviderError::Timeout)?
    }
}

#[async_trait]
impl<P: NetworkProvider> NetworkProvider for TimeoutProvider<P> {
    async fn resolve_device(&self, identifier: &DeviceIdentifier) -> ProviderResult<DeviceHandle> {
        self.bounded(self.inner.resolve_device(identifier)).await
    }

    async fn device_location(
        &self,
        device: &DeviceHandle,
        max_age: Duration,
    ) -> ProviderResult<Location> {
        self.bounded(self.inner.device_location(device, max_age))
            .await
    }

    async fn device_connectivity(
        &self,
        device: &DeviceHandle,
    ) -> ProviderResult<ConnectivityStatus> {
        self.bounded(self.inner.device_connectivity(device)).await
    }

    async fn create_session(
        &self,
        device: &DeviceHandle,
        request: &SessionRequest,
    ) -> ProviderResult<SessionHandle> {
        self.bounded(self.inner.create_session(device, request))
            .await
    }

    async fn list_sessions(&self, device: &DeviceHandle) -> ProviderResult<Vec<SessionHandle>> {
        self.bounded(self.inner.list_sessions(device)).await
    }

    async fn extend_session(
        &self,
        session: &SessionId,
        additional: Duration,
    ) -> ProviderResult<()> {
        self.bounded(self.inner.extend_session(session, additional))
            .await
    }

    async fn delete_session(&self, session: &SessionId) -> ProviderResult<()> {
        self.bounded(self.inner.delete_session(session)).await
    }

    async fn clear_sessions(&self, device: &DeviceHandle) -> ProviderResult<()> {
        self.bounded(self.inner.clear_sessions(device)).await
    }
}
