//! Physics world management with Rapier3D.
//!
//! The range is static: colliders are placed once and only queried, so the
//! world keeps the sets and the query pipeline but never steps a solver.

use crate::collision::{interaction_groups, CollisionGroup};
use engine_core::Vec3;
use rapier3d::prelude::*;

/// Static collision geometry plus the query pipeline used for traces.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Update query pipeline for raycasting. Call after adding or removing colliders.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a ground plane collider (flat Y=0 half-space).
    pub fn add_ground_plane(&mut self) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .collision_groups(interaction_groups(CollisionGroup::environment()))
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a static cuboid target centred at `translation`.
    pub fn add_target_box(&mut self, translation: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![translation.x, translation.y, translation.z])
            .collision_groups(interaction_groups(CollisionGroup::target()))
            .build();
        self.collider_set.insert(collider)
    }

    /// Add the shooter's capsule, standing on `feet` with total `height`.
    pub fn add_shooter_capsule(&mut self, feet: Vec3, height: f32, radius: f32) -> ColliderHandle {
        let half_height = (height * 0.5 - radius).max(0.0);
        let centre = feet + Vec3::Y * (height * 0.5);
        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .translation(vector![centre.x, centre.y, centre.z])
            .collision_groups(interaction_groups(CollisionGroup::shooter()))
            .build();
        self.collider_set.insert(collider)
    }
}
