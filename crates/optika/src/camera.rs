#![forbid(unsafe_code)]

//! Registered camera records.

use optika_provider::DeviceHandle;
use optika_qos::Codec;

/// Advisory health flags for a registered camera.
///
/// These are operator-maintained annotations; no operation gates on them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraStatus {
    /// Camera is believed reachable.
    pub connection: bool,
    /// Footage offload is believed up to date.
    pub footage_sync: bool,
    /// Clock is believed synchronized.
    pub time_sync: bool,
}

/// A camera registered with the [`CameraManager`](crate::CameraManager).
#[derive(Clone, Debug)]
pub struct Camera {
    /// Unique name within the registry.
    pub name: String,
    /// Free-form operator description.
    pub description: String,
    /// Codec the camera records with.
    pub codec: Codec,
    /// Provider-side handle for the camera's network device.
    pub device: DeviceHandle,
    /// Advisory health flags.
    pub status: CameraStatus,
}

impl Camera {
    pub(crate) fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        codec: Codec,
        device: DeviceHandle,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            codec,
            device,
            status: CameraStatus::default(),
        }
    }
}
