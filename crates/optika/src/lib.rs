#![forbid(unsafe_code)]

//! # Optika
//!
//! Facade crate for camera registration and on-demand network QoS sessions.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::time::Duration;
//! use optika::prelude::*;
//!
//! let manager = CameraManager::connect(base_url, api_key, ManagerConfig::default());
//!
//! manager
//!     .add_camera("unit-a", "crane cam", Codec::ProRes4444, &identifier)
//!     .await?;
//!
//! // QOS_L: ProRes 4444 at 4K / 24fps estimates far above 10 Mbps.
//! let session = manager
//!     .create_session(
//!         "unit-a",
//!         Codec::ProRes4444,
//!         Resolution::FourK,
//!         24.0,
//!         Duration::from_secs(600),
//!         "192.0.2.10",
//!     )
//!     .await?;
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod provider {
    pub use optika_provider::*;
}

pub mod qos {
    pub use optika_qos::*;
}

// ── Manager ─────────────────────────────────────────────────────────────

mod camera;
mod config;
mod error;
mod manager;
mod registry;
mod sessions;

pub use camera::{Camera, CameraStatus};
pub use config::ManagerConfig;
pub use error::{CameraError, CameraResult};
pub use manager::CameraManager;

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use optika_provider::{
        ConnectivityStatus, DeviceHandle, DeviceIdentifier, Location, NetworkProvider,
        SessionHandle, SessionId,
    };
    pub use optika_qos::{Codec, QosProfile, Resolution};

    pub use crate::{Camera, CameraError, CameraManager, ManagerConfig};
}
