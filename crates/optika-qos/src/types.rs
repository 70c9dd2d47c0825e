use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bandwidth estimation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QosError {
    #[error("Unknown codec: {0}")]
    UnknownCodec(String),

    #[error("Unknown resolution: {0}")]
    UnknownResolution(String),
}

pub type QosResult<T> = Result<T, QosError>;

/// Camera recording codec.
///
/// The set is extensible; integrating surfaces that accept codec names as
/// strings go through [`FromStr`], where an unrecognized name yields
/// [`QosError::UnknownCodec`] instead of a silently misclassified profile.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Codec {
    #[serde(rename = "PRORES_422_HQ")]
    ProRes422Hq,
    #[serde(rename = "PRORES_4444")]
    ProRes4444,
    #[serde(rename = "PRORES_4444_XQ")]
    ProRes4444Xq,
    #[serde(rename = "ARRI_RAW")]
    ArriRaw,
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::ProRes422Hq => "PRORES_422_HQ",
            Self::ProRes4444 => "PRORES_4444",
            Self::ProRes4444Xq => "PRORES_4444_XQ",
            Self::ArriRaw => "ARRI_RAW",
        };
        f.write_str(tag)
    }
}

impl FromStr for Codec {
    type Err = QosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRORES_422_HQ" => Ok(Self::ProRes422Hq),
            "PRORES_4444" => Ok(Self::ProRes4444),
            "PRORES_4444_XQ" => Ok(Self::ProRes4444Xq),
            "ARRI_RAW" => Ok(Self::ArriRaw),
            other => Err(QosError::UnknownCodec(other.to_string())),
        }
    }
}

/// Requested output resolution for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "UHD")]
    Uhd,
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    /// Bitrate multiplier relative to HD for frame-compressed codecs.
    pub(crate) fn multiplier(self) -> f64 {
        match self {
            Self::Hd => 1.00,
            Self::TwoK => 1.13,
            Self::Uhd => 4.00,
            Self::FourK => 4.55,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Hd => "HD",
            Self::TwoK => "2K",
            Self::Uhd => "UHD",
            Self::FourK => "4K",
        };
        f.write_str(tag)
    }
}

impl FromStr for Resolution {
    type Err = QosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HD" => Ok(Self::Hd),
            "2K" => Ok(Self::TwoK),
            "UHD" => Ok(Self::Uhd),
            "4K" => Ok(Self::FourK),
            other => Err(QosError::UnknownResolution(other.to_string())),
        }
    }
}

/// Discrete network-service tier requested from the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QosProfile {
    #[serde(rename = "QOS_S")]
    S,
    #[serde(rename = "QOS_M")]
    M,
    #[serde(rename = "QOS_L")]
    L,
}

impl QosProfile {
    /// Wire tag as the provider expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S => "QOS_S",
            Self::M => "QOS_M",
            Self::L => "QOS_L",
        }
    }
}

impl fmt::Display for QosProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification thresholds between profile tiers, in Mbps.
///
/// Boundaries are inclusive on the lower tier: a bitrate of exactly
/// `small_max_mbps` classifies as `S`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileThresholds {
    /// Highest bitrate still served by the `S` profile.
    pub small_max_mbps: f64,
    /// Highest bitrate still served by the `M` profile.
    pub medium_max_mbps: f64,
}

impl Default for ProfileThresholds {
    fn default() -> Self {
        Self {
            small_max_mbps: 2.0,
            medium_max_mbps: 10.0,
        }
    }
}

impl ProfileThresholds {
    /// Set the `S`/`M` boundary.
    pub fn with_small_max_mbps(mut self, mbps: f64) -> Self {
        self.small_max_mbps = mbps;
        self
    }

    /// Set the `M`/`L` boundary.
    pub fn with_medium_max_mbps(mut self, mbps: f64) -> Self {
        self.medium_max_mbps = mbps;
        self
    }
}
