#![forbid(unsafe_code)]

//! Session orchestration for [`CameraManager`](crate::CameraManager).
//!
//! Sessions live on the provider; nothing is cached locally. Every lookup
//! re-fetches the camera's session list, so sessions that expired or were
//! altered out-of-band are seen as they are now, not as they were.

use std::time::Duration;

use optika_provider::{SessionHandle, SessionId, SessionRequest};
use optika_qos::{Codec, Resolution, estimate_profile};
use tracing::info;

use crate::{
    error::{CameraError, CameraResult},
    manager::CameraManager,
};

impl CameraManager {
    /// Create a QoS session for a camera feed.
    ///
    /// The profile is recomputed from codec, resolution, and framerate on
    /// every call; resolution and framerate are per-session choices, not
    /// camera attributes.
    pub async fn create_session(
        &self,
        camera_name: &str,
        codec: Codec,
        resolution: Resolution,
        framerate: f64,
        duration: Duration,
        destination: &str,
    ) -> CameraResult<SessionHandle> {
        let entry = self.entry(camera_name).await?;
        let _guard = entry.op_lock.lock().await;

        let profile = estimate_profile(codec, resolution, framerate, &self.config.thresholds);
        let request = SessionRequest {
            qos_profile: profile,
            sink: destination.to_string(),
            duration,
        };

        let session = self
            .provider
            .create_session(&entry.camera.device, &request)
            .await
            .map_err(|source| CameraError::SessionCreationFailed {
                name: camera_name.to_string(),
                source,
            })?;

        info!(
            camera = %camera_name,
            session = %session.id,
            profile = %profile,
            "optika session created"
        );
        Ok(session)
    }

    /// Extend a live session by an additional duration.
    ///
    /// The extension is additive on top of the session's current remaining
    /// time, matching the provider's contract.
    pub async fn extend_session(
        &self,
        camera_name: &str,
        session: &SessionId,
        additional: Duration,
    ) -> CameraResult<()> {
        let entry = self.entry(camera_name).await?;
        let _guard = entry.op_lock.lock().await;

        let sessions = self.provider.list_sessions(&entry.camera.device).await?;
        if !sessions.iter().any(|s| s.id == *session) {
            return Err(CameraError::SessionNotFound(session.0.clone()));
        }

        self.provider.extend_session(session, additional).await?;
        info!(
            camera = %camera_name,
            session = %session,
            additional_secs = additional.as_secs(),
            "optika session extended"
        );
        Ok(())
    }

    /// All live sessions for a camera, queried fresh from the provider.
    pub async fn list_sessions(&self, camera_name: &str) -> CameraResult<Vec<SessionHandle>> {
        let entry = self.entry(camera_name).await?;
        let _guard = entry.op_lock.lock().await;

        let sessions = self.provider.list_sessions(&entry.camera.device).await?;
        Ok(sessions)
    }

    /// Look up one of the camera's live sessions by id.
    pub async fn get_session(
        &self,
        camera_name: &str,
        session: &SessionId,
    ) -> CameraResult<Option<SessionHandle>> {
        let sessions = self.list_sessions(camera_name).await?;
        Ok(sessions.into_iter().find(|s| s.id == *session))
    }

    /// Terminate a live session.
    pub async fn terminate_session(
        &self,
        camera_name: &str,
        session: &SessionId,
    ) -> CameraResult<()> {
        let entry = self.entry(camera_name).await?;
        let _guard = entry.op_lock.lock().await;

        let sessions = self.provider.list_sessions(&entry.camera.device).await?;
        if !sessions.iter().any(|s| s.id == *session) {
            return Err(CameraError::SessionNotFound(session.0.clone()));
        }

        self.provider.delete_session(session).await?;
        info!(camera = %camera_name, session = %session, "optika session terminated");
        Ok(())
    }

    /// Terminate every outstanding session for a camera.
    pub async fn terminate_all_sessions(&self, camera_name: &str) -> CameraResult<()> {
        let entry = self.entry(camera_name).await?;
        let _guard = entry.op_lock.lock().await;

        self.provider.clear_sessions(&entry.camera.device).await?;
        info!(camera = %camera_name, "optika sessions cleared");
        Ok(())
    }
}
