//! Keyframed recoil curves.

use crate::error::CurveError;
use serde::{Deserialize, Serialize};

/// One (time, value) point on a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear function of elapsed time.
///
/// The domain is `[0, duration]`, where duration is the last key's time.
/// Samples before the first key or after the last one hold the endpoint value.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoilCurve {
    keys: Vec<Keyframe>,
}

impl RecoilCurve {
    /// Build a curve. Keys must be finite, non-negative and strictly increasing in time.
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in keys.iter().enumerate() {
            if !key.time.is_finite() || !key.value.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if key.time < 0.0 {
                return Err(CurveError::NegativeTime {
                    index,
                    time: key.time,
                });
            }
            if index > 0 && key.time <= keys[index - 1].time {
                return Err(CurveError::Unordered {
                    index,
                    time: key.time,
                });
            }
        }
        Ok(Self { keys })
    }

    /// Build a curve from `(time, value)` pairs.
    pub fn from_points(points: &[(f32, f32)]) -> Result<Self, CurveError> {
        Self::new(points.iter().map(|&(t, v)| Keyframe::new(t, v)).collect())
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Time of the last key.
    pub fn duration(&self) -> f32 {
        self.keys.last().map_or(0.0, |k| k.time)
    }

    /// Evaluate the curve at `time`, clamped to the endpoint values.
    pub fn sample(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; both neighbours exist after the clamps above.
        let next = self.keys.partition_point(|k| k.time <= time);
        let a = self.keys[next - 1];
        let b = self.keys[next];
        let t = (time - a.time) / (b.time - a.time);
        a.value + (b.value - a.value) * t
    }
}
