use std::{future::Future, time::Duration};

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

use crate::{
    error::{ProviderError, ProviderResult},
    traits::NetworkProvider,
    types::{
        ConnectivityStatus, DeviceHandle, DeviceIdentifier, Location, RetryPolicy, SessionHandle,
        SessionId, SessionRequest,
    },
};

/// Retry decorator for [`NetworkProvider`] implementations.
///
/// Retries retryable errors (timeouts, unavailability, 5xx/429) with the
/// policy's exponential backoff; non-retryable errors propagate immediately.
pub struct RetryProvider<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P: NetworkProvider> RetryProvider<P> {
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn run<T, F, Fut>(&self, mut op: F) -> ProviderResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ProviderResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.policy.max_retries {
            let delay = self.policy.delay_for_attempt(attempt);
            if delay > Duration::ZERO {
                sleep(delay).await;
            }

            match op().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !error.is_retryable() {
                        return Err(error);
                    }
                    debug!(attempt, error = %error, "optika-provider retryable failure");
                    last_error = Some(error);
                }
            }
        }

        Err(ProviderError::RetryExhausted {
            max_retries: self.policy.max_retries,
            source: Box::new(last_error.unwrap_or(ProviderError::Timeout)),
        })
    }
}

#[async_trait]
impl<P: NetworkProvider> NetworkProvider for RetryProvider<P> {
    async fn resolve_device(&self, identifier: &DeviceIdentifier) -> ProviderResult<DeviceHandle> {
        self.run(|| self.inner.resolve_device(identifier)).await
    }

    async fn device_location(
        &self,
        device: &DeviceHandle,
        max_age: Duration,
    ) -> ProviderResult<Location> {
        self.run(|| self.inner.device_location(device, max_age))
            .await
    }

    async fn device_connectivity(
        &self,
        device: &DeviceHandle,
    ) -> ProviderResult<ConnectivityStatus> {
        self.run(|| self.inner.device_connectivity(device)).await
    }

    async fn create_session(
        &self,
        device: &DeviceHandle,
        request: &SessionRequest,
    ) -> ProviderResult<SessionHandle> {
        self.run(|| self.inner.create_session(device, request))
            .await
    }

    async fn list_sessions(&self, device: &DeviceHandle) -> ProviderResult<Vec<SessionHandle>> {
        self.run(|| self.inner.list_sessions(device)).await
    }

    async fn extend_session(
        &self,
        session: &SessionId,
        additional: Duration,
    ) -> ProviderResult<()> {
        self.run(|| self.inner.extend_session(session, additional))
            .await
    }

    async fn delete_session(&self, session: &SessionId) -> ProviderResult<()> {
        self.run(|| self.inner.delete_session(session)).await
    }

    async fn clear_sessions(&self, device: &DeviceHandle) -> ProviderResult<()> {
        self.run(|| self.inner.clear_sessions(device)).await
    }
}
