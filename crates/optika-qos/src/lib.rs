#![forbid(unsafe_code)]

//! Bandwidth estimation for camera feeds.
//!
//! This crate maps a camera's media characteristics (codec, resolution,
//! framerate) to an estimated bitrate and classifies it into a discrete QoS
//! profile tier requested from the network provider.
//!
//! ## Example
//!
//! ```rust
//! use optika_qos::{Codec, ProfileThresholds, QosProfile, Resolution, estimate_profile};
//!
//! let thresholds = ProfileThresholds::default();
//! let profile = estimate_profile(Codec::ProRes4444, Resolution::FourK, 24.0, &thresholds);
//! assert_eq!(profile, QosProfile::L);
//! ```

mod estimator;
mod types;

pub use estimator::{classify, estimate_bitrate_mbps, estimate_profile};
pub use types::{Codec, ProfileThresholds, QosError, QosResult, QosProfile, Resolution};
