#![forbid(unsafe_code)]

//! Configuration for [`CameraManager`](crate::CameraManager).

use std::time::Duration;

use optika_provider::ProviderOptions;
use optika_qos::ProfileThresholds;

/// Manager-wide configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use optika::ManagerConfig;
/// use optika::qos::ProfileThresholds;
///
/// let config = ManagerConfig::default()
///     .with_thresholds(ProfileThresholds::default().with_medium_max_mbps(25.0))
///     .with_location_max_age(Duration::from_secs(600));
/// ```
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    /// Bitrate thresholds for QoS profile classification.
    pub thresholds: ProfileThresholds,
    /// Maximum acceptable staleness for device location queries.
    pub location_max_age: Duration,
    /// Network provider options (request timeout, retry policy).
    pub provider: ProviderOptions,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            thresholds: ProfileThresholds::default(),
            location_max_age: Duration::from_secs(3600),
            provider: ProviderOptions::default(),
        }
    }
}

impl ManagerConfig {
    /// Set QoS classification thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ProfileThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set max staleness for location queries.
    #[must_use]
    pub fn with_location_max_age(mut self, max_age: Duration) -> Self {
        self.location_max_age = max_age;
        self
    }

    /// Set network provider options.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderOptions) -> Self {
        self.provider = provider;
        self
    }
}
