use std::{fmt, net::Ipv6Addr, time::Duration};

use chrono::{DateTime, Utc};
use optika_qos::QosProfile;
use serde::{Deserialize, Serialize};

/// Serde adapter for durations carried on the wire as whole seconds.
pub(crate) mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(de)?))
    }
}

/// How a camera's network-attached device is located at the provider.
///
/// Exactly one variant is active per device. The externally tagged JSON form
/// matches the provider's device object (`{"phoneNumber": "+358..."}` etc.).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceIdentifier {
    NetworkAccessIdentifier(String),
    Ipv4Address(Ipv4Pair),
    Ipv6Address(Ipv6Addr),
    PhoneNumber(String),
}

/// Public/private address pair identifying a NATed device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ipv4Pair {
    pub public_address: String,
    pub private_address: String,
}

/// Opaque reference to a device resource at the provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceHandle(pub String);

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque session identifier assigned by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-side session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Requested,
    Available,
    Unavailable,
}

/// A QoS session as reported by the provider.
///
/// Sessions are owned by the provider; this is a point-in-time snapshot, not
/// locally maintained state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHandle {
    #[serde(rename = "sessionId")]
    pub id: SessionId,
    pub device_id: DeviceHandle,
    pub qos_profile: QosProfile,
    /// Destination address the session reserves bandwidth towards.
    pub sink: String,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
}

/// Parameters for creating a QoS session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub qos_profile: QosProfile,
    pub sink: String,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
}

/// Last-known device location within a bounded freshness window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_location_time: Option<DateTime<Utc>>,
}

/// Live connectivity state of a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectivityStatus {
    ConnectedData,
    ConnectedSms,
    NotConnected,
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::ConnectedData => "CONNECTED_DATA",
            Self::ConnectedSms => "CONNECTED_SMS",
            Self::NotConnected => "NOT_CONNECTED",
        };
        f.write_str(tag)
    }
}

/// Retry policy with exponential backoff.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Backoff before the given attempt. Attempt 0 is the initial call.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponential = self.base_delay * 2_u32.pow(attempt.saturating_sub(1));
        exponential.min(self.max_delay)
    }
}

/// Provider client configuration (timeouts, retries).
#[derive(Clone, Debug)]
pub struct ProviderOptions {
    /// Bound on every individual provider request.
    pub request_timeout: Duration,
    pub retry_policy: RetryPolicy,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl ProviderOptions {
    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Upper bound on a full retried operation: every attempt at the request
    /// timeout plus the backoff between attempts.
    pub fn overall_timeout(&self) -> Duration {
        let mut total = self.request_timeout * (self.retry_policy.max_retries + 1);
        for attempt in 1..=self.retry_policy.max_retries {
            total += self.retry_policy.delay_for_attempt(attempt);
        }
        total
    }
}
