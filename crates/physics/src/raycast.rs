//! Raycasting for weapon hit detection and queries.

use crate::{CollisionGroup, PhysicsWorld};
use engine_core::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

impl PhysicsWorld {
    /// Cast a ray against every collider and return the first hit.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        self.raycast_filtered(origin, direction, max_distance, QueryFilter::default())
    }

    /// Cast a hit-scan ray: environment and targets only, the shooter is ignored.
    pub fn hitscan(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let filter = QueryFilter::default().groups(CollisionGroup::hitscan());
        self.raycast_filtered(origin, direction, max_distance, filter)
    }

    /// Cast a ray with an explicit query filter and return the first hit.
    pub fn raycast_filtered(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(collider, intersection)| {
                let point = ray.point_at(intersection.time_of_impact);
                RaycastHit {
                    collider,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_with_target() -> (PhysicsWorld, ColliderHandle, ColliderHandle) {
        let mut world = PhysicsWorld::new();
        let shooter = world.add_shooter_capsule(Vec3::new(0.0, 0.0, 0.0), 1.8, 0.4);
        let target = world.add_target_box(Vec3::new(0.0, 1.6, -10.0), Vec3::splat(1.0));
        world.update_query_pipeline();
        (world, shooter, target)
    }

    #[test]
    fn raycast_hits_target_face() {
        let (world, _, target) = range_with_target();
        let origin = Vec3::new(0.0, 1.6, -2.0);
        let hit = world.raycast(origin, -Vec3::Z, 100.0).expect("target in line");
        assert_eq!(hit.collider, target);
        assert!((hit.distance - 7.0).abs() < 1e-3);
        assert!((hit.point.z + 9.0).abs() < 1e-3);
        assert!((hit.normal - Vec3::Z).length() < 1e-3);
    }

    #[test]
    fn raycast_respects_max_distance() {
        let (world, _, _) = range_with_target();
        let origin = Vec3::new(0.0, 1.6, -2.0);
        assert!(world.raycast(origin, -Vec3::Z, 5.0).is_none());
    }

    #[test]
    fn hitscan_ignores_the_shooter_capsule() {
        let (world, shooter, target) = range_with_target();
        let eye = Vec3::new(0.0, 1.6, 0.0);

        let plain = world.raycast(eye, -Vec3::Z, 100.0).expect("starts inside shooter");
        assert_eq!(plain.collider, shooter);

        let hit = world.hitscan(eye, -Vec3::Z, 100.0).expect("target in line");
        assert_eq!(hit.collider, target);
        assert!((hit.distance - 9.0).abs() < 1e-3);
    }
}
