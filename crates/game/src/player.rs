//! The shooter's view: where the eye is and where it points.

use engine_core::{Rotator, Vec3};
use weapons::AimController;

/// Pitch limit in degrees, short of straight up/down.
pub const PITCH_LIMIT: f32 = 89.0;

/// Player controller rotation plus eye position.
#[derive(Debug, Clone)]
pub struct PlayerView {
    pub position: Vec3,
    pub eye_height: f32,
    rotation: Rotator,
}

impl PlayerView {
    pub fn new(position: Vec3, eye_height: f32, rotation: Rotator) -> Self {
        let mut view = Self {
            position,
            eye_height,
            rotation: Rotator::ZERO,
        };
        view.set_control_rotation(rotation);
        view
    }

    pub fn rotation(&self) -> Rotator {
        self.rotation
    }

    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::Y * self.eye_height
    }
}

impl AimController for PlayerView {
    fn control_rotation(&self) -> Rotator {
        self.rotation
    }

    fn set_control_rotation(&mut self, rotation: Rotator) {
        let rotation = rotation.normalized();
        self.rotation = Rotator::new(
            rotation.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            rotation.yaw,
            rotation.roll,
        );
    }

    fn add_yaw_input(&mut self, degrees: f32) {
        self.rotation.yaw = Rotator::normalize_axis(self.rotation.yaw + degrees);
    }

    fn add_pitch_input(&mut self, degrees: f32) {
        self.rotation.pitch = (self.rotation.pitch + degrees).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn view_location(&self) -> Vec3 {
        self.eye()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped_and_yaw_wraps() {
        let mut view = PlayerView::new(Vec3::ZERO, 1.6, Rotator::ZERO);
        view.add_pitch_input(120.0);
        assert_eq!(view.rotation().pitch, PITCH_LIMIT);
        view.add_yaw_input(190.0);
        assert!((view.rotation().yaw + 170.0).abs() < 1e-4);
    }

    #[test]
    fn view_point_is_the_eye() {
        let view = PlayerView::new(
            Vec3::new(1.0, 0.0, 2.0),
            1.6,
            Rotator::from_pitch_yaw(0.0, 0.0),
        );
        let (origin, rotation) = view.view_point();
        assert_eq!(origin, Vec3::new(1.0, 1.6, 2.0));
        assert_eq!(rotation, Rotator::ZERO);
        assert!((view.rotation().direction() - Vec3::NEG_Z).length() < 1e-6);
    }
}
