//! Aim rotation in pitch/yaw/roll degrees and interpolation helpers.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Deltas smaller than this count as "already there" for interpolation.
const NEARLY_ZERO_DEGREES: f32 = 1.0e-4;

/// A view rotation in degrees.
///
/// Conventions: positive pitch looks up, positive yaw turns right, and the
/// zero rotation looks down negative Z with Y up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Create a rotation with no roll.
    pub fn from_pitch_yaw(pitch: f32, yaw: f32) -> Self {
        Self::new(pitch, yaw, 0.0)
    }

    /// Wrap an angle into the (-180, 180] range.
    pub fn normalize_axis(angle: f32) -> f32 {
        let mut wrapped = angle % 360.0;
        if wrapped > 180.0 {
            wrapped -= 360.0;
        } else if wrapped <= -180.0 {
            wrapped += 360.0;
        }
        wrapped
    }

    /// Copy of this rotation with every axis wrapped into (-180, 180].
    pub fn normalized(self) -> Self {
        Self {
            pitch: Self::normalize_axis(self.pitch),
            yaw: Self::normalize_axis(self.yaw),
            roll: Self::normalize_axis(self.roll),
        }
    }

    /// True when every axis is within `tolerance` degrees of zero.
    pub fn is_nearly_zero(self, tolerance: f32) -> bool {
        self.pitch.abs() <= tolerance && self.yaw.abs() <= tolerance && self.roll.abs() <= tolerance
    }

    /// Unit view direction for this rotation (roll does not change it).
    pub fn direction(self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, -cos_pitch * cos_yaw)
    }

    /// Ease from `self` toward `target` along the shortest path.
    ///
    /// Moves `clamp(dt * speed, 0, 1)` of the remaining delta, so repeated
    /// calls approach the target exponentially. A non-positive speed snaps
    /// straight to the target; a zero `dt` leaves the rotation unchanged.
    pub fn interp_to(self, target: Rotator, dt: f32, speed: f32) -> Rotator {
        if speed <= 0.0 {
            return target;
        }
        if dt <= 0.0 {
            return self;
        }

        let delta = (target - self).normalized();
        if delta.is_nearly_zero(NEARLY_ZERO_DEGREES) {
            return target;
        }

        let alpha = (dt * speed).clamp(0.0, 1.0);
        Rotator {
            pitch: self.pitch + delta.pitch * alpha,
            yaw: self.yaw + delta.yaw * alpha,
            roll: self.roll + delta.roll * alpha,
        }
        .normalized()
    }
}

impl Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl Sub for Rotator {
    type Output = Rotator;

    fn sub(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch - rhs.pitch, self.yaw - rhs.yaw, self.roll - rhs.roll)
    }
}
