use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{
    error::{ProviderError, ProviderResult},
    traits::NetworkProvider,
    types::{
        ConnectivityStatus, DeviceHandle, DeviceIdentifier, Location, ProviderOptions,
        SessionHandle, SessionId, SessionRequest, duration_secs,
    },
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveResponse {
    device_id: DeviceHandle,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectivityResponse {
    connectivity_status: ConnectivityStatus,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtendRequest {
    #[serde(with = "duration_secs")]
    requested_additional_duration: Duration,
}

/// HTTP implementation of [`NetworkProvider`].
///
/// Talks to a CAMARA-QoD-style REST surface rooted at `base_url`,
/// authenticating with an API key header when one is configured.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    inner: Client,
    base_url: Url,
    api_key: Option<String>,
    options: ProviderOptions,
}

impl HttpProvider {
    /// # Panics
    ///
    /// Panics if the `reqwest::Client` builder fails to build.
    #[must_use]
    pub fn new(base_url: Url, options: ProviderOptions) -> Self {
        let inner = Client::builder().build().expect("failed to build reqwest client");
        Self {
            inner,
            base_url,
            api_key: None,
            options,
        }
    }

    /// Set the API key sent with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn url(&self, segments: &[&str]) -> ProviderResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::Http(format!("base URL cannot have segments: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn prepare(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.timeout(self.options.request_timeout);
        match &self.api_key {
            Some(key) => req.header("x-api-key", key),
            None => req,
        }
    }

    async fn check_status(url: &Url, resp: Response) -> ProviderResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.ok().filter(|b| !b.is_empty());
        match status {
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                Err(ProviderError::Unavailable(format!("HTTP {status} for URL: {url}")))
            }
            _ => Err(ProviderError::status(status.as_u16(), url.to_string(), body)),
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> ProviderResult<T> {
        resp.json::<T>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl NetworkProvider for HttpProvider {
    async fn resolve_device(&self, identifier: &DeviceIdentifier) -> ProviderResult<DeviceHandle> {
        let url = self.url(&["devices"])?;
        debug!(url = %url, "optika-provider resolving device");

        let resp = self
            .prepare(self.inner.post(url.clone()).json(identifier))
            .send()
            .await
            .map_err(ProviderError::from)?;
        let resp = Self::check_status(&url, resp).await?;

        let resolved: ResolveResponse = Self::decode(resp).await?;
        Ok(resolved.device_id)
    }

    async fn device_location(
        &self,
        device: &DeviceHandle,
        max_age: Duration,
    ) -> ProviderResult<Location> {
        let mut url = self.url(&["devices", &device.0, "location"])?;
        url.query_pairs_mut()
            .append_pair("maxAge", &max_age.as_secs().to_string());

        let resp = self
            .prepare(self.inner.get(url.clone()))
            .send()
            .await
            .map_err(ProviderError::from)?;
        let resp = Self::check_status(&url, resp).await?;

        Self::decode(resp).await
    }

    async fn device_connectivity(
        &self,
        device: &DeviceHandle,
    ) -> ProviderResult<ConnectivityStatus> {
        let url = self.url(&["devices", &device.0, "connectivity"])?;

        let resp = self
            .prepare(self.inner.get(url.clone()))
            .send()
            .await
            .map_err(ProviderError::from)?;
        let resp = Self::check_status(&url, resp).await?;

        let connectivity: ConnectivityResponse = Self::decode(resp).await?;
        Ok(connectivity.connectivity_status)
    }

    async fn create_session(
        &self,
        device: &DeviceHandle,
        request: &SessionRequest,
    ) -> ProviderResult<SessionHandle> {
        let url = self.url(&["devices", &device.0, "sessions"])?;
        debug!(
            url = %url,
            profile = %request.qos_profile,
            duration_secs = request.duration.as_secs(),
            "optika-provider creating session"
        );

        let resp = self
            .prepare(self.inner.post(url.clone()).json(request))
            .send()
            .await
            .map_err(ProviderError::from)?;
        let resp = Self::check_status(&url, resp).await?;

        Self::decode(resp).await
    }

    async fn list_sessions(&self, device: &DeviceHandle) -> ProviderResult<Vec<SessionHandle>> {
        let url = self.url(&["devices", &device.0, "sessions"])?;

        let resp = self
            .prepare(self.inner.get(url.clone()))
            .send()
            .await
            .map_err(ProviderError::from)?;
        let resp = Self::check_status(&url, resp).await?;

        Self::decode(resp).await
    }

    async fn extend_session(
        &self,
        session: &SessionId,
        additional: Duration,
    ) -> ProviderResult<()> {
        let url = self.url(&["sessions", &session.0, "extend"])?;
        debug!(
            url = %url,
            additional_secs = additional.as_secs(),
            "optika-provider extending session"
        );

        let body = ExtendRequest {
            requested_additional_duration: additional,
        };
        let resp = self
            .prepare(self.inner.post(url.clone()).json(&body))
            .send()
            .await
            .map_err(ProviderError::from)?;
        Self::check_status(&url, resp).await?;
        Ok(())
    }

    async fn delete_session(&self, session: &SessionId) -> ProviderResult<()> {
        let url = self.url(&["sessions", &session.0])?;
        debug!(url = %url, "optika-provider deleting session");

        let resp = self
            .prepare(self.inner.delete(url.clone()))
            .send()
            .await
            .map_err(ProviderError::from)?;
        Self::check_status(&url, resp).await?;
        Ok(())
    }

    async fn clear_sessions(&self, device: &DeviceHandle) -> ProviderResult<()> {
        let url = self.url(&["devices", &device.0, "sessions"])?;
        debug!(url = %url, "optika-provider clearing sessions");

        let resp = self
            .prepare(self.inner.delete(url.clone()))
            .send()
            .await
            .map_err(ProviderError::from)?;
        Self::check_status(&url, resp).await?;
        Ok(())
    }
}
