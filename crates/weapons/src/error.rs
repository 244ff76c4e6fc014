//! Configuration errors surfaced when a weapon is built.

use std::fmt;
use thiserror::Error;

/// Which recoil axis a curve drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoilAxis {
    Yaw,
    Pitch,
}

impl fmt::Display for RecoilAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoilAxis::Yaw => f.write_str("yaw"),
            RecoilAxis::Pitch => f.write_str("pitch"),
        }
    }
}

/// A keyframe list that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve has no keyframes")]
    Empty,
    #[error("keyframe {index} is not finite")]
    NonFinite { index: usize },
    #[error("keyframe {index} has negative time {time}")]
    NegativeTime { index: usize, time: f32 },
    #[error("keyframe {index} at t={time} is not after the previous key")]
    Unordered { index: usize, time: f32 },
}

/// Weapon configuration rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{axis} recoil curve: {source}")]
    Curve {
        axis: RecoilAxis,
        #[source]
        source: CurveError,
    },
    #[error("recoil curves end at t=0, the timeline would have no length")]
    ZeroDuration,
    #[error("magazine capacity must be at least 1")]
    ZeroCapacity,
    #[error("fire period must be positive and finite, got {0}")]
    FirePeriod(f32),
    #[error("reload delay must be non-negative and finite, got {0}")]
    ReloadDelay(f32),
    #[error("max range must be positive and finite, got {0}")]
    MaxRange(f32),
    #[error("recovery speed must be positive and finite, got {0}")]
    RecoverySpeed(f32),
}
