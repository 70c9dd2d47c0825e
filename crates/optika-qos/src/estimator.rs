use crate::types::{Codec, ProfileThresholds, QosProfile, Resolution};

/// Mbps produced by each ProRes variant at HD / 24 fps, divided by 24 to get
/// a per-frame rate. ARRI RAW is handled separately in
/// [`estimate_bitrate_mbps`].
fn base_rate_mbps_per_frame(codec: Codec) -> f64 {
    match codec {
        Codec::ProRes422Hq => 188.0 / 24.0,
        Codec::ProRes4444 => 274.0 / 24.0,
        Codec::ProRes4444Xq => 403.0 / 24.0,
        Codec::ArriRaw => 2891.0 / 24.0,
    }
}

/// Estimate the bitrate (Mbps) of a feed with the given characteristics.
///
/// ARRI RAW is raw sensor readout: its bitrate scales linearly with framerate
/// and ignores the requested output resolution. The ProRes variants scale by
/// a resolution multiplier relative to HD.
pub fn estimate_bitrate_mbps(codec: Codec, resolution: Resolution, framerate: f64) -> f64 {
    let base = base_rate_mbps_per_frame(codec);
    match codec {
        Codec::ArriRaw => base * framerate,
        _ => base * resolution.multiplier() * framerate,
    }
}

/// Classify a bitrate into a profile tier.
///
/// Boundaries are inclusive on the lower tier (see [`ProfileThresholds`]).
pub fn classify(bitrate_mbps: f64, thresholds: &ProfileThresholds) -> QosProfile {
    if bitrate_mbps <= thresholds.small_max_mbps {
        QosProfile::S
    } else if bitrate_mbps <= thresholds.medium_max_mbps {
        QosProfile::M
    } else {
        QosProfile::L
    }
}

/// Map a codec/resolution/framerate triple to the QoS profile to request.
///
/// Pure and deterministic; recomputed per session request, never cached.
pub fn estimate_profile(
    codec: Codec,
    resolution: Resolution,
    framerate: f64,
    thresholds: &ProfileThresholds,
) -> QosProfile {
    let bitrate = estimate_bitrate_mbps(codec, resolution, framerate);
    classify(bitrate, thresholds)
}
