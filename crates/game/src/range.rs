//! The firing range: static geometry for traces and target bookkeeping.

use glam::Vec3;
use hecs::{Entity, World};
use physics::{ColliderHandle, PhysicsWorld};
use std::collections::HashMap;
use weapons::ShotReport;

use crate::config::RangeConfig;

/// Shooter capsule dimensions.
const SHOOTER_HEIGHT: f32 = 1.8;
const SHOOTER_RADIUS: f32 = 0.4;

/// A box on the range that counts hits.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
}

/// Hits landed on a target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hits {
    pub count: u32,
}

/// What a shot struck.
#[derive(Debug, Clone, PartialEq)]
pub enum Impact {
    Target { name: String, distance: f32 },
    Environment { point: Vec3, distance: f32 },
    Miss,
}

pub struct FiringRange {
    pub physics: PhysicsWorld,
    world: World,
    colliders: HashMap<ColliderHandle, Entity>,
}

impl FiringRange {
    pub fn new(config: &RangeConfig) -> Self {
        let mut physics = PhysicsWorld::new();
        let mut world = World::new();
        let mut colliders = HashMap::new();

        physics.add_ground_plane();
        physics.add_shooter_capsule(config.shooter_position, SHOOTER_HEIGHT, SHOOTER_RADIUS);

        for target in &config.targets {
            let handle = physics.add_target_box(target.position, target.half_extents);
            let entity = world.spawn((
                Target {
                    name: target.name.clone(),
                },
                Hits::default(),
            ));
            colliders.insert(handle, entity);
        }
        physics.update_query_pipeline();

        log::info!("Range ready with {} targets", config.targets.len());
        Self {
            physics,
            world,
            colliders,
        }
    }

    /// Credit the hit (if any) of a resolved shot.
    pub fn record(&mut self, shot: &ShotReport) -> Impact {
        let Some(hit) = &shot.hit else {
            return Impact::Miss;
        };
        let entity = hit.collider.and_then(|handle| self.colliders.get(&handle).copied());
        let Some(entity) = entity else {
            return Impact::Environment {
                point: hit.point,
                distance: hit.distance,
            };
        };
        match self.world.query_one_mut::<(&Target, &mut Hits)>(entity) {
            Ok((target, hits)) => {
                hits.count += 1;
                Impact::Target {
                    name: target.name.clone(),
                    distance: hit.distance,
                }
            }
            Err(_) => Impact::Environment {
                point: hit.point,
                distance: hit.distance,
            },
        }
    }

    /// Hit counts per target, in spawn order.
    pub fn tally(&self) -> Vec<(String, u32)> {
        let mut tally: Vec<(Entity, String, u32)> = self
            .world
            .query::<(&Target, &Hits)>()
            .iter()
            .map(|(entity, (target, hits))| (entity, target.name.clone(), hits.count))
            .collect();
        tally.sort_by_key(|(entity, _, _)| entity.id());
        tally.into_iter().map(|(_, name, count)| (name, count)).collect()
    }

    pub fn total_hits(&self) -> u32 {
        self.tally().iter().map(|(_, count)| count).sum()
    }
}
