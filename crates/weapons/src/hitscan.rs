//! Instant line traces used to resolve shots.

use engine_core::Vec3;
use physics::{ColliderHandle, PhysicsWorld, RaycastHit};

/// Impact of a hit-scan trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub point: Vec3,
    pub normal: Vec3,
    /// Distance from the trace origin.
    pub distance: f32,
    /// Collider that was struck, when the trace came from the physics world.
    pub collider: Option<ColliderHandle>,
}

impl From<RaycastHit> for HitResult {
    fn from(hit: RaycastHit) -> Self {
        Self {
            point: hit.point,
            normal: hit.normal,
            distance: hit.distance,
            collider: Some(hit.collider),
        }
    }
}

/// Service answering "what does a ray from here hit first".
pub trait HitScan {
    fn trace_line(&self, origin: Vec3, direction: Vec3, max_range: f32) -> Option<HitResult>;
}

/// Traces the physics world, skipping the shooter's own collider.
impl HitScan for PhysicsWorld {
    fn trace_line(&self, origin: Vec3, direction: Vec3, max_range: f32) -> Option<HitResult> {
        if direction.length_squared() <= f32::EPSILON {
            return None;
        }
        self.hitscan(origin, direction.normalize(), max_range)
            .map(HitResult::from)
    }
}

/// A world with nothing in it.
impl HitScan for () {
    fn trace_line(&self, _origin: Vec3, _direction: Vec3, _max_range: f32) -> Option<HitResult> {
        None
    }
}
