#![forbid(unsafe_code)]

use optika_provider::ProviderError;
use optika_qos::QosError;
use thiserror::Error;

pub type CameraResult<T> = Result<T, CameraError>;

/// Errors surfaced by [`CameraManager`](crate::CameraManager) operations.
#[derive(Debug, Error)]
pub enum CameraError {
    /// Camera name is empty or whitespace.
    #[error("invalid camera name: {0:?}")]
    InvalidName(String),

    /// A camera with this name is already registered.
    #[error("camera already registered: {0}")]
    DuplicateName(String),

    /// The network provider could not resolve the camera's device identifier.
    #[error("device resolution failed for camera {name}: {source}")]
    DeviceResolutionFailed {
        name: String,
        #[source]
        source: ProviderError,
    },

    /// No camera registered under this name.
    #[error("camera not found: {0}")]
    CameraNotFound(String),

    /// No active session with this id on the camera's device.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The provider rejected or failed the session creation request.
    #[error("session creation failed for camera {name}: {source}")]
    SessionCreationFailed {
        name: String,
        #[source]
        source: ProviderError,
    },

    /// Bandwidth estimation rejected the input (unknown codec or resolution tag).
    #[error(transparent)]
    Qos(#[from] QosError),

    /// A provider call exceeded its time budget.
    #[error("network provider timed out")]
    ProviderTimeout,

    /// The provider is temporarily unreachable.
    #[error("network provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Any other provider failure.
    #[error(transparent)]
    Provider(ProviderError),
}

impl From<ProviderError> for CameraError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::Timeout => Self::ProviderTimeout,
            ProviderError::Unavailable(message) => Self::ProviderUnavailable(message),
            ProviderError::RetryExhausted { ref source, .. } if source.is_timeout() => {
                Self::ProviderTimeout
            }
            other => Self::Provider(other),
        }
    }
}
