//! Narrow interfaces to the host engine.
//!
//! The weapon never owns controller rotation, collision or presentation.
//! The host lends them for the duration of each call through [`Host`].

use crate::fire::ShotReport;
use crate::hitscan::HitScan;
use engine_core::{Rotator, Vec3};

/// Live manual look input for this frame, in controller input units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookInput {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookInput {
    pub const ZERO: Self = Self { yaw: 0.0, pitch: 0.0 };

    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// The player is actively steering on either axis.
    pub fn is_steering(&self) -> bool {
        self.yaw.abs() > 0.0 || self.pitch.abs() > 0.0
    }
}

/// The player controller whose aim the weapon reads and writes.
pub trait AimController {
    fn control_rotation(&self) -> Rotator;

    fn set_control_rotation(&mut self, rotation: Rotator);

    /// Add yaw input in degrees, as mouse turn would.
    fn add_yaw_input(&mut self, degrees: f32);

    /// Add pitch input in degrees, as mouse look would.
    fn add_pitch_input(&mut self, degrees: f32);

    /// World position of the eye.
    fn view_location(&self) -> Vec3;

    /// Eye position and view rotation used as the hit-scan origin.
    fn view_point(&self) -> (Vec3, Rotator) {
        (self.view_location(), self.control_rotation())
    }
}

/// Fire-and-forget presentation hooks. Return values are never consumed.
pub trait FeedbackSink {
    fn play_sound(&mut self, cue: &str, location: Vec3);

    fn play_animation(&mut self, cue: &str);

    /// A round was spent and its trace resolved.
    fn shot_fired(&mut self, _shot: &ShotReport) {}
}

/// Discards every notification.
impl FeedbackSink for () {
    fn play_sound(&mut self, _cue: &str, _location: Vec3) {}

    fn play_animation(&mut self, _cue: &str) {}
}

/// Collaborators borrowed from the host for one weapon call.
pub struct Host<'a> {
    pub controller: &'a mut dyn AimController,
    pub hitscan: &'a dyn HitScan,
    pub feedback: &'a mut dyn FeedbackSink,
}

impl<'a> Host<'a> {
    pub fn new(
        controller: &'a mut dyn AimController,
        hitscan: &'a dyn HitScan,
        feedback: &'a mut dyn FeedbackSink,
    ) -> Self {
        Self {
            controller,
            hitscan,
            feedback,
        }
    }
}
